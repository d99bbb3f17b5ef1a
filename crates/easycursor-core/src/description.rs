//! Read contract for a query description attached to a cursor.
//!
//! A cursor can carry the model that produced its rows, shared by
//! reference: the model may outlive the cursor (for example, persisted as
//! JSON and replayed later). The cursor only needs this narrow read
//! surface, implemented by the query-model crate.

use std::fmt;

use crate::error::Result;

/// The read contract of an attached query model.
pub trait QueryDescription: fmt::Debug + Send + Sync {
    /// User-supplied comment, if any.
    fn comment(&self) -> Option<&str>;

    /// User-supplied tag, if any.
    fn tag(&self) -> Option<&str>;

    /// Model version; 0 when never set.
    fn version(&self) -> i32;

    /// Serialize the description to its JSON envelope.
    fn to_json(&self) -> Result<String>;
}
