//! Version-gated implementation registry
//!
//! A library can publish several implementations of one function or type,
//! each valid for a distinct half-open range of a caller-supplied target
//! version. A [`Registry`] keeps the ranges of each signature disjoint, so a
//! target version selects at most one implementation.
//!
//! ```
//! use version_gate::{Registry, VersionIdentifier};
//!
//! let registry = Registry::new("netlib");
//! registry
//!     .register("netlib.connect", "v1", Some(1u64.into()), Some(2u64.into()))
//!     .unwrap();
//! registry
//!     .register("netlib.connect", "v2", Some(2u64.into()), None)
//!     .unwrap();
//!
//! let target: VersionIdentifier = "2.3".parse().unwrap();
//! assert_eq!(registry.resolve("netlib.connect", &target), Ok("v2"));
//! ```
//!
//! # Modules
//!
//! - [`version`]: Version identifiers, the comparator and intervals
//! - [`registry`]: Overlap-enforcing registry and lookups
//! - [`signature`]: Signature derivation for functions and types
//! - [`directory`]: Module name → registry directory used by tooling
//! - [`manifest`]: JSON registry declarations
//! - [`config`] / [`logging`]: Command-line configuration and tracing setup

pub mod config;
pub mod directory;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod signature;
pub mod version;

pub use directory::Directory;
pub use registry::{RegisteredEntry, Registry, RegistryError};
pub use signature::{Signature, SignatureResolver, TypeNameResolver};
pub use version::{UpperBound, VersionError, VersionIdentifier, VersionSpec};
