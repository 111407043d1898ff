//! Version-gated registry
//!
//! A [`Registry`] owns, per signature, an ordered list of implementations
//! together with the version interval each one is valid for. The intervals of
//! one signature never overlap, so any target version selects at most one
//! implementation.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::directory::Directory;
use crate::registry::error::RegistryError;
use crate::signature::{Signature, SignatureResolver, TypeNameResolver};
use crate::version::identifier::VersionIdentifier;
use crate::version::spec::VersionSpec;

/// An implementation and the interval it was registered for
#[derive(Debug, Clone)]
pub struct RegisteredEntry<T> {
    implementation: T,
    interval: VersionSpec,
}

impl<T> RegisteredEntry<T> {
    pub fn implementation(&self) -> &T {
        &self.implementation
    }

    pub fn interval(&self) -> &VersionSpec {
        &self.interval
    }
}

type Table<T> = IndexMap<String, Vec<RegisteredEntry<T>>>;

pub struct Registry<T> {
    name: String,
    table: RwLock<Table<T>>,
    resolver: Arc<dyn SignatureResolver>,
}

impl<T: Clone> Registry<T> {
    /// Create an empty registry that derives item signatures from type names
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_resolver(name, Arc::new(TypeNameResolver))
    }

    pub fn with_resolver(name: impl Into<String>, resolver: Arc<dyn SignatureResolver>) -> Self {
        Self {
            name: name.into(),
            table: RwLock::new(IndexMap::new()),
            resolver,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Entries are only ever appended with a single push under the write lock,
    // so a poisoned table is still consistent and is used as is.
    fn read_table(&self) -> RwLockReadGuard<'_, Table<T>> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, Table<T>> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `implementation` for `signature` over `[min, max)`
    ///
    /// # Errors
    /// * `RegistryError::Version` - `min` does not precede `max`
    /// * `RegistryError::OverlappingVersion` - the interval overlaps one already
    ///   registered for `signature`; the registry is left unchanged
    pub fn register(
        &self,
        signature: &str,
        implementation: T,
        min: Option<VersionIdentifier>,
        max: Option<VersionIdentifier>,
    ) -> Result<(), RegistryError> {
        let interval = VersionSpec::new(min, max)?;
        self.register_spec(signature, implementation, interval)
    }

    /// Register `implementation` for `signature` over a prebuilt interval
    pub fn register_spec(
        &self,
        signature: &str,
        implementation: T,
        interval: VersionSpec,
    ) -> Result<(), RegistryError> {
        let signature = Signature::new(signature)?;

        // Overlap check and append form one critical section
        let mut table = self.write_table();

        if let Some(existing) = table
            .get(signature.as_str())
            .and_then(|entries| entries.iter().find(|e| e.interval.overlaps(&interval)))
        {
            warn!(
                "Rejected registration of {} ({}) in '{}': overlaps {}",
                signature, interval, self.name, existing.interval
            );
            return Err(RegistryError::OverlappingVersion {
                signature: signature.to_string(),
                existing: existing.interval.to_string(),
                requested: interval.to_string(),
            });
        }

        debug!("Registered {} ({}) in '{}'", signature, interval, self.name);
        table
            .entry(signature.to_string())
            .or_default()
            .push(RegisteredEntry {
                implementation,
                interval,
            });

        Ok(())
    }

    /// Register an item under the signature the resolver derives for it
    ///
    /// Returns the signature used, so callers can look the item up later.
    ///
    /// With the default [`TypeNameResolver`] only fn items and named types are
    /// accepted; fn pointers, closures and other shared type names fail with
    /// `SignatureError::NotAnItem`. That resolver also gives every fn item its
    /// own signature, so `connect_v1` and `connect_v2` never share one. To
    /// publish several versions of one logical function, install a resolver
    /// that maps them to a common signature ([`Registry::with_resolver`]) or
    /// call [`Registry::register`] with the signature directly.
    pub fn register_item<I: ?Sized>(
        &self,
        item: &I,
        implementation: T,
        min: Option<VersionIdentifier>,
        max: Option<VersionIdentifier>,
    ) -> Result<Signature, RegistryError> {
        let signature = self
            .resolver
            .signature_of(std::any::type_name_of_val(item))?;
        self.register(signature.as_str(), implementation, min, max)?;
        Ok(signature)
    }

    pub fn is_registered(&self, signature: &str) -> bool {
        self.num_versions(signature) > 0
    }

    pub fn is_item_registered<I: ?Sized>(&self, item: &I) -> bool {
        self.resolver
            .signature_of(std::any::type_name_of_val(item))
            .is_ok_and(|signature| self.is_registered(signature.as_str()))
    }

    /// Number of intervals registered for `signature` (0 if unknown)
    pub fn num_versions(&self, signature: &str) -> usize {
        self.read_table().get(signature).map_or(0, Vec::len)
    }

    /// Select the implementation of `signature` valid for `target`
    ///
    /// Entries are scanned in registration order. Since intervals never
    /// overlap, at most one can match.
    ///
    /// # Errors
    /// * `RegistryError::SignatureNotFound` - nothing registered for `signature`
    /// * `RegistryError::NoMatchingVersion` - no interval contains `target`
    pub fn resolve(&self, signature: &str, target: &VersionIdentifier) -> Result<T, RegistryError> {
        let table = self.read_table();

        let entries = table
            .get(signature)
            .filter(|entries| !entries.is_empty())
            .ok_or_else(|| RegistryError::SignatureNotFound(signature.to_string()))?;

        let entry = entries
            .iter()
            .find(|entry| entry.interval.contains(target))
            .ok_or_else(|| RegistryError::NoMatchingVersion {
                signature: signature.to_string(),
                version: target.to_string(),
            })?;

        debug!("Resolved {} @ {} to {}", signature, target, entry.interval);
        Ok(entry.implementation.clone())
    }

    /// Parse `target` and resolve it
    ///
    /// Malformed versions fail with `RegistryError::Version` wrapping
    /// `VersionError::InvalidVersionValue`.
    pub fn resolve_value(&self, signature: &str, target: &str) -> Result<T, RegistryError> {
        let target: VersionIdentifier = target.parse()?;
        self.resolve(signature, &target)
    }

    /// Resolve a `semver` target by its `major.minor.patch`
    pub fn resolve_semver(
        &self,
        signature: &str,
        target: &semver::Version,
    ) -> Result<T, RegistryError> {
        self.resolve(signature, &VersionIdentifier::from(target))
    }

    /// Registered signatures, in first-registration order
    pub fn signatures(&self) -> Vec<String> {
        self.read_table().keys().cloned().collect()
    }

    /// Snapshot of the entries of `signature`, in registration order
    pub fn versions(&self, signature: &str) -> Vec<RegisteredEntry<T>> {
        self.read_table()
            .get(signature)
            .cloned()
            .unwrap_or_default()
    }

    /// Announce this registry to `directory` under the given module names
    pub fn announce<I, S>(&self, directory: &Directory, modules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        directory.announce(&self.name, modules);
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("table", &*self.read_table())
            .finish_non_exhaustive()
    }
}
