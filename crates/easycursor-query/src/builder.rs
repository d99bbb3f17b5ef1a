//! Builders for query models.
//!
//! Accumulate fields with chainable setters, then `build()`. A builder
//! stays usable after `build()`: every build clones the accumulated
//! state into a fresh, independent model, so mutating the builder (or
//! building again) never touches previously built models.
//!
//! # Example
//!
//! ```
//! use easycursor_query::builder::SelectModelBuilder;
//!
//! let model = SelectModelBuilder::new()
//!     .tables("users")
//!     .selection("age > ?")
//!     .selection_args(&["18"])
//!     .sort_order("name ASC")
//!     .build()
//!     .unwrap();
//! assert_eq!(model.to_sql(), "SELECT * FROM users WHERE age > ? ORDER BY name ASC");
//! ```

use easycursor_core::Result;

use crate::model::{RawModel, SelectModel};

/// Builder for [`SelectModel`].
#[derive(Debug, Clone, Default)]
pub struct SelectModelBuilder {
    projection: Option<Vec<String>>,
    selection: Option<String>,
    selection_args: Option<Vec<String>>,
    tables: Option<String>,
    group_by: Option<String>,
    having: Option<String>,
    sort_order: Option<String>,
    limit: Option<String>,
    distinct: bool,
    strict: bool,
    comment: Option<String>,
    tag: Option<String>,
    version: i32,
}

impl SelectModelBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output columns. An empty slice is kept as an empty list,
    /// which renders as all columns but round-trips distinctly from
    /// "never set".
    #[must_use]
    pub fn projection(mut self, columns: &[&str]) -> Self {
        self.projection = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Set the filter expression (positional placeholders allowed).
    #[must_use]
    pub fn selection(mut self, clause: impl Into<String>) -> Self {
        self.selection = Some(clause.into());
        self
    }

    /// Set the positional filter arguments.
    #[must_use]
    pub fn selection_args(mut self, args: &[&str]) -> Self {
        self.selection_args = Some(args.iter().map(|a| (*a).to_string()).collect());
        self
    }

    /// Set the source table expression.
    #[must_use]
    pub fn tables(mut self, tables: impl Into<String>) -> Self {
        self.tables = Some(tables.into());
        self
    }

    /// Set the GROUP BY expression.
    #[must_use]
    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    /// Set the HAVING expression.
    #[must_use]
    pub fn having(mut self, having: impl Into<String>) -> Self {
        self.having = Some(having.into());
        self
    }

    /// Set the sort order expression.
    #[must_use]
    pub fn sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }

    /// Set the row limit expression.
    #[must_use]
    pub fn limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Eliminate duplicate rows.
    #[must_use]
    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Reject ambiguous or ill-formed input at build time.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Attach a user comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach a user tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the model version.
    #[must_use]
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Validate mandatory fields and produce an immutable model.
    ///
    /// Fails with [`easycursor_core::Error::IllegalModelState`] when the
    /// mandatory fields for the current strictness are missing.
    pub fn build(&self) -> Result<SelectModel> {
        let model = SelectModel {
            projection: self.projection.clone(),
            selection: self.selection.clone(),
            selection_args: self.selection_args.clone(),
            tables: self.tables.clone(),
            group_by: self.group_by.clone(),
            having: self.having.clone(),
            sort_order: self.sort_order.clone(),
            limit: self.limit.clone(),
            distinct: self.distinct,
            strict: self.strict,
            comment: self.comment.clone(),
            tag: self.tag.clone(),
            version: self.version,
        };
        model.validate()?;
        Ok(model)
    }
}

/// Builder for [`RawModel`].
#[derive(Debug, Clone, Default)]
pub struct RawModelBuilder {
    raw_sql: Option<String>,
    selection_args: Option<Vec<String>>,
    comment: Option<String>,
    tag: Option<String>,
    version: i32,
}

impl RawModelBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw query text.
    #[must_use]
    pub fn raw_sql(mut self, sql: impl Into<String>) -> Self {
        self.raw_sql = Some(sql.into());
        self
    }

    /// Set the positional arguments.
    #[must_use]
    pub fn selection_args(mut self, args: &[&str]) -> Self {
        self.selection_args = Some(args.iter().map(|a| (*a).to_string()).collect());
        self
    }

    /// Attach a user comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach a user tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the model version.
    #[must_use]
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Validate and produce an immutable model. Fails with
    /// [`easycursor_core::Error::IllegalModelState`] when no query text
    /// was set.
    pub fn build(&self) -> Result<RawModel> {
        let model = RawModel {
            raw_sql: self.raw_sql.clone().unwrap_or_default(),
            selection_args: self.selection_args.clone(),
            comment: self.comment.clone(),
            tag: self.tag.clone(),
            version: self.version,
        };
        model.validate()?;
        Ok(model)
    }
}
