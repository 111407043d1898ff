//! Directory of registries by external module name
//!
//! Tooling uses the directory to tell whether a module publishes
//! version-gated items. It is an ordinary owned value: create one, share it
//! (e.g. behind an `Arc`), and `clear` it between test runs.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

#[derive(Debug, Default)]
pub struct Directory {
    modules: RwLock<HashMap<String, String>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each module name to the registry named `registry_name`
    ///
    /// A module announced again is re-pointed at the latest registry.
    pub fn announce<I, S>(&self, registry_name: &str, modules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = self.modules.write().unwrap_or_else(PoisonError::into_inner);
        for module in modules {
            let module = module.into();
            debug!("Module '{}' announced by registry '{}'", module, registry_name);
            map.insert(module, registry_name.to_string());
        }
    }

    pub fn is_registered(&self, module: &str) -> bool {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(module)
    }

    /// Name of the registry announced for `module`
    pub fn registry_for(&self, module: &str) -> Option<String> {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(module)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every announced module
    pub fn clear(&self) {
        self.modules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
