//! Input-contract errors.
//!
//! Messy data never produces an error: unparseable dates, missing ids and
//! unknown labels all degrade locally. The variants here cover callers handing
//! the engine something that is not a record array at all.

use thiserror::Error;

/// Errors raised at the record boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The fleet input document was not a JSON object.
    #[error("fleet input must be an object of record arrays, got {found}")]
    NotADocument { found: &'static str },

    /// A record collection was not a JSON array.
    #[error("{what} must be an array of records, got {found}")]
    NotAnArray {
        what: &'static str,
        found: &'static str,
    },

    /// An element of a record collection was not a JSON object.
    #[error("{what}[{index}] must be an object, got {found}")]
    NotAnObject {
        what: &'static str,
        index: usize,
        found: &'static str,
    },
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
