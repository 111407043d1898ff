//! Declarative registry manifests
//!
//! A manifest describes a registry in JSON so it can be validated and queried
//! without running the program that owns it:
//!
//! ```json
//! {
//!   "name": "netlib",
//!   "modules": ["netlib", "netlib.client"],
//!   "items": {
//!     "netlib.connect": [
//!       { "implementation": "connect_v1", "min": 1, "max": "2.5" },
//!       { "implementation": "connect_v2", "min": [2, 5] }
//!     ]
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::directory::Directory;
use crate::registry::{Registry, RegistryError};
use crate::version::identifier::VersionIdentifier;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid declaration for {signature}: {source}")]
    Registration {
        signature: String,
        #[source]
        source: RegistryError,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Registry name
    pub name: String,
    /// External module names the registry is announced under
    pub modules: Vec<String>,
    /// Signature → implementations, in declaration order
    pub items: IndexMap<String, Vec<ManifestEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub implementation: String,
    #[serde(default)]
    pub min: Option<VersionIdentifier>,
    #[serde(default)]
    pub max: Option<VersionIdentifier>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Register every declared entry, in file order, into a new registry.
    ///
    /// The first invalid range or overlapping interval aborts the build.
    pub fn build_registry(&self) -> Result<Registry<String>, ManifestError> {
        let registry = Registry::new(self.name.clone());

        for (signature, entries) in &self.items {
            for entry in entries {
                registry
                    .register(
                        signature,
                        entry.implementation.clone(),
                        entry.min.clone(),
                        entry.max.clone(),
                    )
                    .map_err(|source| ManifestError::Registration {
                        signature: signature.clone(),
                        source,
                    })?;
            }
        }

        info!(
            "Built registry '{}' with {} signatures",
            self.name,
            self.items.len()
        );
        Ok(registry)
    }

    /// Announce the manifest's modules to `directory`
    pub fn announce(&self, directory: &Directory) {
        directory.announce(&self.name, self.modules.iter().cloned());
    }
}

impl FromStr for Manifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
