//! Signatures identifying registrable functions and types
//!
//! A signature is an opaque, non-empty string that is stable for a given
//! declaration and unique within the process. The registry only uses it as a
//! map key.

use std::fmt;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Signature must not be empty")]
    Empty,

    #[error("{0} does not name a function item or type declaration")]
    NotAnItem(String),
}

/// Stable identifier of a function or type declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

impl Signature {
    pub fn new(value: impl Into<String>) -> Result<Self, SignatureError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SignatureError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derives signatures from language-level identity
///
/// Implementations must return the same signature for the same declaration
/// and distinct signatures for distinct declarations.
#[cfg_attr(test, automock)]
pub trait SignatureResolver: Send + Sync {
    /// Resolve the signature of an item given its Rust type name
    /// (as produced by [`std::any::type_name`])
    fn signature_of(&self, type_name: &str) -> Result<Signature, SignatureError>;
}

/// Uses the fully qualified Rust type name as the signature.
///
/// For function items this is the path of the function
/// (e.g. `my_crate::net::connect`), for types the path of the type.
///
/// Type names that are shared by many declarations are rejected with
/// [`SignatureError::NotAnItem`]: fn pointers (`fn() -> u32`), references,
/// raw pointers, slices, arrays, tuples, trait objects and closures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeNameResolver;

const NON_ITEM_PREFIXES: &[&str] = &["fn(", "unsafe ", "extern ", "&", "*", "[", "(", "dyn "];

impl SignatureResolver for TypeNameResolver {
    fn signature_of(&self, type_name: &str) -> Result<Signature, SignatureError> {
        if NON_ITEM_PREFIXES.iter().any(|p| type_name.starts_with(p))
            || type_name.contains("{{closure}}")
        {
            return Err(SignatureError::NotAnItem(type_name.to_string()));
        }
        Signature::new(type_name)
    }
}

/// Signature of the type `T` under [`TypeNameResolver`]
pub fn type_signature<T: ?Sized>() -> Signature {
    Signature(std::any::type_name::<T>().to_string())
}

/// Signature of the value's type under [`TypeNameResolver`]
pub fn item_signature<T: ?Sized>(item: &T) -> Signature {
    Signature(std::any::type_name_of_val(item).to_string())
}
