//! Registry of version-gated implementations
//!
//! - [`context`]: Per-owner table of signature → intervals with overlap checks
//! - [`error`]: Registration and lookup errors

pub mod context;
pub mod error;

pub use context::{RegisteredEntry, Registry};
pub use error::RegistryError;
