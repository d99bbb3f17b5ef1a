//! Immutable query models.
//!
//! A model describes how a result set was (or should be) produced. The
//! two variants share a metadata triple (comment, tag, version) and are
//! immutable once built: construction goes through the builders in
//! [`crate::builder`], which validate mandatory fields first.
//!
//! Serde attributes double as the wire format: `None` fields omit their
//! key, absent keys decode to `None`, empty lists stay empty lists, and
//! the discriminator rides in the `"type"` key. See [`crate::json`].

use serde::{Deserialize, Serialize};

use easycursor_core::description::QueryDescription;
use easycursor_core::{Error, Result};

/// A structured SELECT-style query description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectModel {
    /// Output column expressions; `None` means all columns.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) projection: Option<Vec<String>>,
    /// Filter expression with positional placeholders.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) selection: Option<String>,
    /// Arguments aligned positionally with the filter's placeholders.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) selection_args: Option<Vec<String>>,
    /// Source table expression.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) tables: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) having: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) limit: Option<String>,
    #[serde(default)]
    pub(crate) distinct: bool,
    /// Reject ambiguous or ill-formed input when true.
    #[serde(default)]
    pub(crate) strict: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) tag: Option<String>,
    #[serde(default)]
    pub(crate) version: i32,
}

impl SelectModel {
    /// Output column expressions; `None` means all columns.
    #[must_use]
    pub fn projection(&self) -> Option<&[String]> {
        self.projection.as_deref()
    }

    /// Filter expression, if set.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Positional filter arguments, if set.
    #[must_use]
    pub fn selection_args(&self) -> Option<&[String]> {
        self.selection_args.as_deref()
    }

    /// Source table expression, if set.
    #[must_use]
    pub fn tables(&self) -> Option<&str> {
        self.tables.as_deref()
    }

    /// GROUP BY expression, if set.
    #[must_use]
    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    /// HAVING expression, if set.
    #[must_use]
    pub fn having(&self) -> Option<&str> {
        self.having.as_deref()
    }

    /// Sort order expression, if set.
    #[must_use]
    pub fn sort_order(&self) -> Option<&str> {
        self.sort_order.as_deref()
    }

    /// Row limit expression, if set.
    #[must_use]
    pub fn limit(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    /// Whether duplicate rows are eliminated.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Whether strict input validation was requested.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Mandatory-field check shared by the builder and the JSON decoder:
    /// strict mode requires tables, otherwise at least one of tables or
    /// selection must be set.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.strict {
            if self.tables.is_none() {
                return Err(Error::IllegalModelState { field: "tables" });
            }
        } else if self.tables.is_none() && self.selection.is_none() {
            return Err(Error::IllegalModelState {
                field: "tables or selection",
            });
        }
        Ok(())
    }

    /// Render the equivalent SELECT statement, placeholders left in place.
    ///
    /// Engine collaborators are free to ignore this and consume the
    /// structured fields directly.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        match &self.projection {
            Some(columns) if !columns.is_empty() => sql.push_str(&columns.join(", ")),
            _ => sql.push('*'),
        }
        if let Some(tables) = &self.tables {
            sql.push_str(" FROM ");
            sql.push_str(tables);
        }
        if let Some(selection) = &self.selection {
            sql.push_str(" WHERE ");
            sql.push_str(selection);
        }
        if let Some(group_by) = &self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group_by);
        }
        if let Some(having) = &self.having {
            sql.push_str(" HAVING ");
            sql.push_str(having);
        }
        if let Some(sort_order) = &self.sort_order {
            sql.push_str(" ORDER BY ");
            sql.push_str(sort_order);
        }
        if let Some(limit) = &self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(limit);
        }
        sql
    }
}

/// An opaque query string plus positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawModel {
    /// The raw query text. Never empty on a built model.
    #[serde(default)]
    pub(crate) raw_sql: String,
    /// Arguments aligned positionally with the query's placeholders.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) selection_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) tag: Option<String>,
    #[serde(default)]
    pub(crate) version: i32,
}

impl RawModel {
    /// The raw query text.
    #[must_use]
    pub fn raw_sql(&self) -> &str {
        &self.raw_sql
    }

    /// Positional arguments, if set.
    #[must_use]
    pub fn selection_args(&self) -> Option<&[String]> {
        self.selection_args.as_deref()
    }

    /// An absent key decodes to an empty string, so empty and missing
    /// are rejected alike.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.raw_sql.is_empty() {
            return Err(Error::IllegalModelState { field: "raw_sql" });
        }
        Ok(())
    }
}

/// The discriminated union of the two model variants.
///
/// Serializes with an internal `"type"` tag (`"select"` / `"raw"`);
/// decoding reads the tag first and fails fast on anything unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryModel {
    /// Structured query parameters.
    Select(SelectModel),
    /// Opaque query string plus arguments.
    Raw(RawModel),
}

impl QueryModel {
    /// User-supplied comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self {
            QueryModel::Select(m) => m.comment.as_deref(),
            QueryModel::Raw(m) => m.comment.as_deref(),
        }
    }

    /// User-supplied tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            QueryModel::Select(m) => m.tag.as_deref(),
            QueryModel::Raw(m) => m.tag.as_deref(),
        }
    }

    /// Model version; 0 when never set.
    #[must_use]
    pub const fn version(&self) -> i32 {
        match self {
            QueryModel::Select(m) => m.version,
            QueryModel::Raw(m) => m.version,
        }
    }

    /// Borrow the select variant, if this is one.
    #[must_use]
    pub const fn as_select(&self) -> Option<&SelectModel> {
        match self {
            QueryModel::Select(m) => Some(m),
            QueryModel::Raw(_) => None,
        }
    }

    /// Borrow the raw variant, if this is one.
    #[must_use]
    pub const fn as_raw(&self) -> Option<&RawModel> {
        match self {
            QueryModel::Raw(m) => Some(m),
            QueryModel::Select(_) => None,
        }
    }

    /// Render the query text for either variant.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            QueryModel::Select(m) => m.to_sql(),
            QueryModel::Raw(m) => m.raw_sql.clone(),
        }
    }

    /// Serialize to the JSON envelope.
    pub fn to_json(&self) -> Result<String> {
        crate::json::to_json(self)
    }

    /// Reconstruct a model from its JSON envelope.
    pub fn from_json(text: &str) -> Result<Self> {
        crate::json::from_json(text)
    }
}

impl QueryDescription for QueryModel {
    fn comment(&self) -> Option<&str> {
        self.comment()
    }

    fn tag(&self) -> Option<&str> {
        self.tag()
    }

    fn version(&self) -> i32 {
        self.version()
    }

    fn to_json(&self) -> Result<String> {
        self.to_json()
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{RawModelBuilder, SelectModelBuilder};

    #[test]
    fn test_to_sql_minimal() {
        let model = SelectModelBuilder::new().tables("users").build().unwrap();
        assert_eq!(model.to_sql(), "SELECT * FROM users");
    }

    #[test]
    fn test_to_sql_all_clauses() {
        let model = SelectModelBuilder::new()
            .distinct(true)
            .projection(&["name", "count(*) AS n"])
            .tables("users")
            .selection("age > ?")
            .selection_args(&["18"])
            .group_by("name")
            .having("n > 1")
            .sort_order("name ASC")
            .limit("10")
            .build()
            .unwrap();
        assert_eq!(
            model.to_sql(),
            "SELECT DISTINCT name, count(*) AS n FROM users WHERE age > ? \
             GROUP BY name HAVING n > 1 ORDER BY name ASC LIMIT 10"
        );
    }

    #[test]
    fn test_to_sql_empty_projection_means_star() {
        let model = SelectModelBuilder::new()
            .projection(&[])
            .tables("t")
            .build()
            .unwrap();
        assert_eq!(model.to_sql(), "SELECT * FROM t");
    }

    #[test]
    fn test_raw_to_sql_passthrough() {
        let model = RawModelBuilder::new()
            .raw_sql("SELECT 1")
            .build()
            .unwrap();
        assert_eq!(model.raw_sql(), "SELECT 1");
    }

    #[test]
    fn test_metadata_defaults() {
        let model = SelectModelBuilder::new().tables("t").build().unwrap();
        assert_eq!(model.comment, None);
        assert_eq!(model.tag, None);
        assert_eq!(model.version, 0);
    }
}
