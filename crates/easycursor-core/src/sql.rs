//! Relational backend over an external engine's row-set handle.
//!
//! Query execution is not this crate's business: a relational engine
//! collaborator runs the query and hands back something implementing
//! [`RowSet`]. [`SqlBackend`] adapts that handle to the cursor contract,
//! building its field map once from the result-set column metadata.

use std::fmt;

use crate::backend::RowBackend;
use crate::coerce::{BoolPolicy, SqlBoolPolicy};
use crate::field::{CaseMode, FieldMap};
use crate::value::Value;

/// A positioned result-set handle produced by a relational engine.
///
/// Navigation against the engine may block; that blocking is synchronous
/// and uncancellable from this layer.
pub trait RowSet {
    /// Column names as emitted by the engine, in projection order.
    fn column_names(&self) -> Vec<String>;

    /// Total number of rows in the result set.
    fn row_count(&self) -> usize;

    /// Raw value at `(row, column)`.
    fn value(&self, row: usize, column: usize) -> Value;

    /// Release the underlying engine handle.
    fn close(&mut self) {}
}

/// Cursor backend wrapping a relational [`RowSet`].
pub struct SqlBackend {
    rows: Box<dyn RowSet>,
    fields: FieldMap,
}

impl SqlBackend {
    /// Wrap an engine handle, deriving the field map from its column
    /// metadata. Relational names are case-sensitive, as emitted.
    #[must_use]
    pub fn new(rows: Box<dyn RowSet>) -> Self {
        let mut fields = FieldMap::new(CaseMode::Sensitive);
        for name in rows.column_names() {
            fields.push(name);
        }
        Self { rows, fields }
    }
}

impl RowBackend for SqlBackend {
    fn row_count(&self) -> usize {
        self.rows.row_count()
    }

    fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    fn value_at(&self, row: usize, column: usize) -> Value {
        self.rows.value(row, column)
    }

    fn bool_policy(&self) -> Box<dyn BoolPolicy> {
        Box::new(SqlBoolPolicy)
    }

    fn release(&mut self) {
        self.rows.close();
    }
}

impl fmt::Debug for SqlBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlBackend")
            .field("columns", &self.fields.names())
            .field("row_count", &self.rows.row_count())
            .finish_non_exhaustive()
    }
}
