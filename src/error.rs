//! Crate error type.
//!
//! Only API misuse surfaces as an error. Data-quality problems in the
//! corpus (bad links, unknown rarities, names that cannot be interpreted)
//! are logged and recovered from where they occur.

use thiserror::Error;

/// Errors returned by the registry, loaders and query surface.
#[derive(Debug, Error)]
pub enum CardTextError {
    /// A card with this name exists and the new record disagrees with it.
    #[error("card {name:?} is already registered with different content")]
    DuplicateName { name: String },

    /// A raw record lacked a required field.
    #[error("raw record is missing the {field:?} field")]
    MissingField { field: &'static str },

    /// No card with this name (or shortname) is registered.
    #[error("no card named {0:?}")]
    UnknownCard(String),

    /// Structured record or configuration could not be decoded.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// An externally supplied search pattern did not compile.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CardTextError>;
