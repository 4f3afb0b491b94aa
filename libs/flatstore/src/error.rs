use std::fmt;

use crate::schema::Kind;
use crate::value::ValueKind;

/// Category of a decode error. Every category is fatal for the document;
/// the kind only tells the caller *why* it failed (layout drift, renamed
/// field, upstream schema change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bytes are not a JSON document.
    Json,
    /// `nodes`/`data`/anchor missing or of the wrong shape.
    Structural,
    IndexOutOfRange,
    TypeMismatch,
    MissingField,
    /// Mapping stage: value present but of the wrong kind for its field.
    TypeCoercion,
    /// Endpoint configuration does not fit the call.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Json => f.write_str("json"),
            ErrorKind::Structural => f.write_str("structural"),
            ErrorKind::IndexOutOfRange => f.write_str("index_out_of_range"),
            ErrorKind::TypeMismatch => f.write_str("type_mismatch"),
            ErrorKind::MissingField => f.write_str("missing_field"),
            ErrorKind::TypeCoercion => f.write_str("type_coercion"),
            ErrorKind::Config => f.write_str("config"),
        }
    }
}

/// Decode failure. `path` always names the document location that failed,
/// e.g. `nodes[2].data[0].financialData`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON document: {0}")]
    Json(String),

    #[error("{path}: {detail}")]
    Structural { path: String, detail: String },

    #[error("{path}: index {index} out of range (store holds {len} values)")]
    IndexOutOfRange { path: String, index: i64, len: usize },

    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: ValueKind,
    },

    #[error("{path}: required field '{field}' is missing")]
    MissingField { path: String, field: String },

    #[error("{path}: field '{field}' expects {expected}, found {found}")]
    TypeCoercion {
        path: String,
        field: String,
        expected: Kind,
        found: String,
    },

    #[error("config: {0}")]
    Config(String),
}

impl DecodeError {
    pub(crate) fn structural(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Structural { path: path.into(), detail: detail.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Json(_) => ErrorKind::Json,
            DecodeError::Structural { .. } => ErrorKind::Structural,
            DecodeError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            DecodeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            DecodeError::MissingField { .. } => ErrorKind::MissingField,
            DecodeError::TypeCoercion { .. } => ErrorKind::TypeCoercion,
            DecodeError::Config(_) => ErrorKind::Config,
        }
    }

    /// Failing document path, if the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::Structural { path, .. }
            | DecodeError::IndexOutOfRange { path, .. }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::MissingField { path, .. }
            | DecodeError::TypeCoercion { path, .. } => Some(path),
            DecodeError::Json(_) | DecodeError::Config(_) => None,
        }
    }

    /// Add context to the error, preserving its kind.
    ///
    /// Produces: `"context: original path"` (or message, for path-less errors).
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            DecodeError::Json(msg) => DecodeError::Json(format!("{ctx}: {msg}")),
            DecodeError::Config(msg) => DecodeError::Config(format!("{ctx}: {msg}")),
            DecodeError::Structural { path, detail } => {
                DecodeError::Structural { path: format!("{ctx}: {path}"), detail }
            }
            DecodeError::IndexOutOfRange { path, index, len } => {
                DecodeError::IndexOutOfRange { path: format!("{ctx}: {path}"), index, len }
            }
            DecodeError::TypeMismatch { path, expected, found } => {
                DecodeError::TypeMismatch { path: format!("{ctx}: {path}"), expected, found }
            }
            DecodeError::MissingField { path, field } => {
                DecodeError::MissingField { path: format!("{ctx}: {path}"), field }
            }
            DecodeError::TypeCoercion { path, field, expected, found } => DecodeError::TypeCoercion {
                path: format!("{ctx}: {path}"),
                field,
                expected,
                found,
            },
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
