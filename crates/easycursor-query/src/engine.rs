//! The execution collaborator interface.
//!
//! Running a query is delegated to an external relational engine. The
//! engine consumes a [`QueryModel`] (structured fields or rendered SQL,
//! its choice) and returns its native row-set handle. Execution may
//! block; that blocking is synchronous and uncancellable from this
//! layer, so a caller wanting cancellation must not start the call.

use easycursor_core::Result;
use easycursor_core::sql::RowSet;

use crate::model::QueryModel;

/// A relational engine able to execute a query model.
pub trait SqlEngine {
    /// Execute the model and return a positioned row-set handle.
    fn execute(&self, model: &QueryModel) -> Result<Box<dyn RowSet>>;
}
