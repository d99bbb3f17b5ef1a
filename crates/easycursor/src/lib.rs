//! EasyCursor: typed, backend-agnostic row cursors with serializable
//! query models.
//!
//! One cursor surface, three backends:
//!
//! - **relational** — wraps the row-set handle an external engine
//!   returns ([`SqlBackend`], with [`SqlEngine`] as the execution seam);
//! - **JSON array** — each row is one object in an ordered array
//!   ([`JsonBackend`]);
//! - **object collection** — homogeneous records with explicit field
//!   descriptors ([`ObjectBackend`]).
//!
//! Typed access comes in a strict `get_*` family that fails loudly and a
//! tolerant `opt_*` family that falls back to caller defaults, with
//! boolean truthiness as a swappable per-backend policy.
//!
//! Queries are described by an immutable [`QueryModel`] (structured
//! select or raw string) built via [`SelectModelBuilder`] /
//! [`RawModelBuilder`], attached to the cursor that ran them, and
//! convertible to and from a JSON envelope for persistence and replay.
//!
//! # Example
//!
//! ```
//! use easycursor::prelude::*;
//!
//! let backend = JsonBackend::from_str(r#"[{"name":"Ada","age":36}]"#).unwrap();
//! let mut cursor = EasyCursor::new(backend);
//! while cursor.move_to_next().unwrap() {
//!     let name = cursor.get_string("name").unwrap();
//!     let age = cursor.opt_int("age", 0).unwrap();
//!     assert_eq!((name.as_str(), age), ("Ada", 36));
//! }
//! cursor.close();
//! ```

use std::sync::Arc;

pub use easycursor_core::{
    BoolPolicy, CaseMode, EasyCursor, Error, FieldMap, JsonBoolPolicy, ObjectBoolPolicy,
    QueryDescription, Result, RowBackend, RowSet, SqlBackend, SqlBoolPolicy, Value, coerce,
};
pub use easycursor_json::JsonBackend;
pub use easycursor_object::{FieldDescriptor, ObjectBackend, Record, field_name_from_accessor};
pub use easycursor_query::{
    QueryModel, RawModel, RawModelBuilder, SelectModel, SelectModelBuilder, SqlEngine, json,
};

/// Run a model against an engine and attach it to the resulting cursor,
/// so the query that produced the rows stays introspectable.
pub fn execute_model<E: SqlEngine>(
    engine: &E,
    model: QueryModel,
) -> Result<EasyCursor<SqlBackend>> {
    let rows = engine.execute(&model)?;
    Ok(EasyCursor::new(SqlBackend::new(rows)).with_query_description(Arc::new(model)))
}

/// Common imports for cursor consumers.
pub mod prelude {
    pub use easycursor_core::{
        BoolPolicy, EasyCursor, Error, Result, RowBackend, RowSet, SqlBackend, Value,
    };
    pub use easycursor_json::JsonBackend;
    pub use easycursor_object::{FieldDescriptor, ObjectBackend, Record};
    pub use easycursor_query::{
        QueryModel, RawModelBuilder, SelectModelBuilder, SqlEngine,
    };

    pub use crate::execute_model;
}
