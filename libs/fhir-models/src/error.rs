//! Error taxonomy for the JSON codec.
//!
//! Every decode or encode failure surfaces one of these variants. `path` is
//! a dotted field chain rooted at the resource type, e.g.
//! `Observation.value` or `Bundle.entry[0].resource`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Required field missing, wrong JSON kind, or another shape mismatch.
    #[error("schema error at {path}: {message}")]
    Schema { path: String, message: String },

    /// Two or more variants of one choice element present at once.
    #[error("choice conflict at {path}: {message}")]
    ChoiceConflict { path: String, message: String },

    /// `contained[]` / `Bundle.entry.resource` discriminator not in the catalog.
    #[error("unknown resource type `{resource_type}` at {path}")]
    UnknownResourceType { path: String, resource_type: String },

    /// Malformed primitive literal (integer, decimal, base64, temporal).
    #[error("invalid primitive at {path}: {message}")]
    PrimitiveParse { path: String, message: String },

    /// `null` is never a valid FHIR field value.
    #[error("null is not a valid value at {path}")]
    NullValue { path: String },

    /// A value whose in-memory state cannot be encoded.
    #[error("encode invariant violated: {0}")]
    EncodeInvariant(String),

    /// Malformed JSON, or a serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The dotted path to the offending location, when the error carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Schema { path, .. }
            | Error::ChoiceConflict { path, .. }
            | Error::UnknownResourceType { path, .. }
            | Error::PrimitiveParse { path, .. }
            | Error::NullValue { path } => Some(path),
            Error::EncodeInvariant(_) | Error::Json(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
