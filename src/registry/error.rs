use thiserror::Error;

use crate::signature::SignatureError;
use crate::version::error::VersionError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Overlapping version for {signature}: {requested} overlaps registered {existing}")]
    OverlappingVersion {
        signature: String,
        existing: String,
        requested: String,
    },

    #[error("Signature not found: {0}")]
    SignatureNotFound(String),

    #[error("No version of {signature} matches {version}")]
    NoMatchingVersion { signature: String, version: String },

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}
