//! Object-collection cursor backend.
//!
//! Rows are homogeneous in-memory records. A record type declares an
//! explicit [`FieldDescriptor`] — name plus extraction function per
//! field — and the resulting field map is computed once per type and
//! shared process-wide through [`registry::field_map_for`], safe under
//! concurrent first use. Name lookup is case-insensitive, matching the
//! accessor-convention origin of the names.
//!
//! # Example
//!
//! ```
//! use easycursor_core::{EasyCursor, Value};
//! use easycursor_object::{FieldDescriptor, ObjectBackend, Record};
//!
//! struct Person { name: String, age: i64 }
//!
//! impl Record for Person {
//!     fn descriptor() -> FieldDescriptor<Self> {
//!         FieldDescriptor::new()
//!             .field("getName", |p: &Person| Value::from(p.name.clone()))
//!             .field("getAge", |p: &Person| Value::from(p.age))
//!     }
//! }
//!
//! let rows = vec![Person { name: "Ada".into(), age: 36 }];
//! let mut cursor = EasyCursor::new(ObjectBackend::new(rows));
//! cursor.move_to_first().unwrap();
//! assert_eq!(cursor.get_string("name").unwrap(), "Ada");
//! ```

pub mod descriptor;
pub mod registry;

use std::sync::Arc;

use easycursor_core::backend::RowBackend;
use easycursor_core::coerce::{BoolPolicy, ObjectBoolPolicy};
use easycursor_core::field::FieldMap;
use easycursor_core::Value;

pub use descriptor::{field_name_from_accessor, FieldDescriptor, Record};

/// Cursor backend over a collection of records.
pub struct ObjectBackend<T: Record> {
    rows: Vec<T>,
    fields: Arc<FieldMap>,
    extractors: Vec<fn(&T) -> Value>,
}

impl<T: Record> ObjectBackend<T> {
    /// Wrap a collection of records, reusing the type's cached field map.
    #[must_use]
    pub fn new(rows: Vec<T>) -> Self {
        let fields = registry::field_map_for::<T>();
        let (_, extractors) = T::descriptor().into_parts();
        Self {
            rows,
            fields,
            extractors,
        }
    }
}

impl<T: Record> RowBackend for ObjectBackend<T> {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    fn value_at(&self, row: usize, column: usize) -> Value {
        match (self.rows.get(row), self.extractors.get(column)) {
            (Some(record), Some(extract)) => extract(record),
            _ => Value::Null,
        }
    }

    fn bool_policy(&self) -> Box<dyn BoolPolicy> {
        Box::new(ObjectBoolPolicy)
    }

    fn release(&mut self) {
        self.rows.clear();
    }
}

impl<T: Record> std::fmt::Debug for ObjectBackend<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectBackend")
            .field("record_type", &std::any::type_name::<T>())
            .field("rows", &self.rows.len())
            .field("fields", &self.fields.names())
            .finish_non_exhaustive()
    }
}
