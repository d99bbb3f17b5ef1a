//! JSON-array cursor backend.
//!
//! Each row is one JSON object inside an ordered array. The field map is
//! the union of keys across every row, so heterogeneous documents are
//! fine: a key missing from a particular row reads as null there.
//!
//! Sources that lack a stable primary key can still be treated as if
//! they had one: [`JsonBackend::alias`] binds a logical name (say
//! `"_id"`) to a physical key that already exists, and
//! [`JsonBackend::alias_ordinal`] synthesizes a column carrying the
//! row's ordinal position.
//!
//! # Example
//!
//! ```
//! use easycursor_core::EasyCursor;
//! use easycursor_json::JsonBackend;
//!
//! let backend = JsonBackend::from_str(r#"[{"a":1},{"a":2}]"#)
//!     .unwrap()
//!     .alias("_id", "a")
//!     .unwrap();
//! let mut cursor = EasyCursor::new(backend);
//! cursor.move_to_first().unwrap();
//! assert_eq!(cursor.get_long("_id").unwrap(), 1);
//! ```

use serde_json::{Map, Value as JsonValue};

use easycursor_core::backend::RowBackend;
use easycursor_core::coerce::{BoolPolicy, JsonBoolPolicy};
use easycursor_core::field::{CaseMode, FieldMap};
use easycursor_core::{Error, Result, Value};

/// Cursor backend over an array of JSON objects.
#[derive(Debug)]
pub struct JsonBackend {
    rows: Vec<Map<String, JsonValue>>,
    fields: FieldMap,
    /// Synthesized row-ordinal column, if one was requested.
    ordinal_column: Option<usize>,
}

impl JsonBackend {
    /// Parse a JSON array of objects.
    ///
    /// Fails with [`Error::MalformedModel`] when the text is not valid
    /// JSON, not an array, or contains a non-object element.
    pub fn from_str(text: &str) -> Result<Self> {
        let root: JsonValue = serde_json::from_str(text).map_err(|e| Error::MalformedModel {
            reason: format!("invalid JSON: {e}"),
        })?;
        let JsonValue::Array(elements) = root else {
            return Err(Error::MalformedModel {
                reason: "row source is not a JSON array".to_string(),
            });
        };
        let mut rows = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            match element {
                JsonValue::Object(object) => rows.push(object),
                other => {
                    return Err(Error::MalformedModel {
                        reason: format!("row {i} is not a JSON object, got {other}"),
                    });
                }
            }
        }
        Ok(Self::from_rows(rows))
    }

    /// Wrap already-parsed row objects.
    #[must_use]
    pub fn from_rows(rows: Vec<Map<String, JsonValue>>) -> Self {
        let mut fields = FieldMap::new(CaseMode::Sensitive);
        for row in &rows {
            for key in row.keys() {
                fields.push(key.as_str());
            }
        }
        tracing::debug!(
            rows = rows.len(),
            fields = fields.len(),
            "probed JSON row source"
        );
        Self {
            rows,
            fields,
            ordinal_column: None,
        }
    }

    /// Bind a logical name to a physical key that already exists, so
    /// both resolve to the same column index.
    ///
    /// Fails with [`Error::NoSuchColumn`] when the physical key was not
    /// seen in any row.
    pub fn alias(mut self, logical: &str, physical: &str) -> Result<Self> {
        self.fields.add_alias(logical, physical)?;
        Ok(self)
    }

    /// Synthesize a column carrying the row's ordinal position, under
    /// the given logical name. Shadows any same-named physical key.
    #[must_use]
    pub fn alias_ordinal(mut self, logical: &str) -> Self {
        let idx = self.fields.push(logical);
        self.ordinal_column = Some(idx);
        self
    }
}

fn to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        JsonValue::String(s) => Value::Text(s.clone()),
        // Nested structures read back as their JSON text.
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Text(nested.to_string()),
    }
}

impl RowBackend for JsonBackend {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    fn value_at(&self, row: usize, column: usize) -> Value {
        if self.ordinal_column == Some(column) {
            return Value::Int(row as i64);
        }
        let Some(name) = self.fields.name_at(column) else {
            return Value::Null;
        };
        self.rows
            .get(row)
            .and_then(|r| r.get(name))
            .map_or(Value::Null, to_value)
    }

    fn bool_policy(&self) -> Box<dyn BoolPolicy> {
        Box::new(JsonBoolPolicy)
    }

    fn release(&mut self) {
        self.rows.clear();
    }
}
