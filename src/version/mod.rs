//! Version model for version-gated implementations
//!
//! This module provides the value types used to describe which target versions
//! an implementation is valid for.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐     ┌───────────────────┐
//! │ VersionIdentifier │◀────│    VersionSpec    │
//! │  (padded compare) │     │   [min, max)      │
//! └───────────────────┘     └───────────────────┘
//!           ▲                         ▲
//!           │                         │
//!     ┌─────────────┐                 │
//!     │ UpperBound  │─────────────────┘
//!     │ (Unbounded) │
//!     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`identifier`]: Version tuples and the comparator all ordering goes through
//! - [`spec`]: Half-open version intervals with containment and overlap tests
//! - [`error`]: Error types for invalid ranges and malformed version values

pub mod error;
pub mod identifier;
pub mod spec;

pub use error::VersionError;
pub use identifier::{UpperBound, VersionIdentifier, compare, compare_to_bound};
pub use spec::VersionSpec;
