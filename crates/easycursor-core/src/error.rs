//! Error types shared across the EasyCursor crates.

use std::fmt;

/// Convenience result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy for cursors, coercion, and query models.
///
/// Strict accessors propagate these immediately; the `opt_*` family never
/// does — every data-shaped failure collapses into the caller-supplied
/// fallback. Only [`Error::Closed`] escapes the `opt_*` family, because a
/// closed cursor is a lifecycle bug rather than missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value was present but could not be coerced to the requested type.
    Conversion {
        /// Rendering of the offending value (`"null"` for a null value).
        value: String,
        /// The requested target type.
        target: &'static str,
    },
    /// A strict get named a column the backend does not expose.
    NoSuchColumn {
        /// The unknown column name.
        name: String,
    },
    /// A typed get was issued while the cursor sat outside `[0, row_count)`.
    OutOfRange {
        /// The cursor position at the time of the call.
        position: i64,
        /// Total rows in the backend.
        row_count: usize,
    },
    /// The cursor has been closed; no further operations are permitted.
    Closed,
    /// `build()` was called with a mandatory field missing.
    IllegalModelState {
        /// The field (or field group) that was not set.
        field: &'static str,
    },
    /// A JSON document was structurally invalid: a model envelope missing
    /// or carrying an unknown discriminator, or a row source that is not
    /// an array of objects.
    MalformedModel {
        /// Human-readable description of what was wrong.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Conversion { value, target } => {
                write!(f, "cannot convert value '{value}' to {target}")
            }
            Error::NoSuchColumn { name } => write!(f, "no such column: '{name}'"),
            Error::OutOfRange {
                position,
                row_count,
            } => write!(
                f,
                "cursor position {position} is outside the valid range 0..{row_count}"
            ),
            Error::Closed => write!(f, "cursor is closed"),
            Error::IllegalModelState { field } => {
                write!(f, "cannot build query model: '{field}' is not set")
            }
            Error::MalformedModel { reason } => write!(f, "malformed model: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
