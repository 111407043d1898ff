use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version range: minimum {min} must be lower than maximum {max}")]
    InvalidRange { min: String, max: String },

    #[error("Invalid version value: {0} (expected a non-negative integer or tuple of them)")]
    InvalidVersionValue(String),
}
