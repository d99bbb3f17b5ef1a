//! The cursor: positioned navigation plus typed column access.
//!
//! `EasyCursor` wraps one backend and exposes the same surface whether
//! the rows came from a relational engine, a JSON array, or an object
//! collection. Position is always in `[-1, row_count]`, where `-1` and
//! `row_count` are the before-first / after-last sentinels; typed gets
//! fail outside `[0, row_count - 1]`.
//!
//! Two accessor families:
//! - the strict `get_*` family propagates [`Error`] immediately
//!   (unknown column, sentinel position, value not coercible);
//! - the tolerant `opt_*` family converts every data-shaped failure into
//!   the caller-supplied fallback, so backend heterogeneity is invisible
//!   to callers that do not care.
//!
//! After `close()`, every operation fails with [`Error::Closed`].

use std::sync::Arc;

use crate::backend::RowBackend;
use crate::coerce::{self, BoolPolicy};
use crate::description::QueryDescription;
use crate::error::{Error, Result};
use crate::value::Value;

/// A typed, positioned cursor over one backend's rows.
#[derive(Debug)]
pub struct EasyCursor<B: RowBackend> {
    backend: B,
    /// Current position, `-1 ..= row_count`.
    position: i64,
    closed: bool,
    bool_policy: Box<dyn BoolPolicy>,
    /// Attached by reference; the model may outlive the cursor.
    description: Option<Arc<dyn QueryDescription>>,
}

impl<B: RowBackend> EasyCursor<B> {
    /// Wrap a backend, starting before the first row with the backend's
    /// default truthiness policy.
    #[must_use]
    pub fn new(backend: B) -> Self {
        let bool_policy = backend.bool_policy();
        Self {
            backend,
            position: -1,
            closed: false,
            bool_policy,
            description: None,
        }
    }

    /// Attach the query description that produced these rows.
    #[must_use]
    pub fn with_query_description(mut self, description: Arc<dyn QueryDescription>) -> Self {
        self.description = Some(description);
        self
    }

    /// Swap the boolean truthiness policy.
    #[must_use]
    pub fn with_bool_policy(mut self, policy: Box<dyn BoolPolicy>) -> Self {
        self.bool_policy = policy;
        self
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed { Err(Error::Closed) } else { Ok(()) }
    }

    /// Raw value at the current row, with range checks.
    fn raw(&self, column: usize) -> Result<Value> {
        let count = self.backend.row_count();
        if self.position < 0 || self.position >= count as i64 {
            return Err(Error::OutOfRange {
                position: self.position,
                row_count: count,
            });
        }
        Ok(self.backend.value_at(self.position as usize, column))
    }

    fn column_for(&self, name: &str) -> Result<usize> {
        self.backend
            .field_map()
            .index_of(name)
            .ok_or_else(|| Error::NoSuchColumn {
                name: name.to_string(),
            })
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column < self.backend.field_map().len() {
            Ok(())
        } else {
            Err(Error::NoSuchColumn {
                name: format!("#{column}"),
            })
        }
    }

    /// Tolerant lookup: `None` for unknown names and sentinel positions.
    fn opt_raw(&self, name: &str) -> Option<Value> {
        let column = self.backend.field_map().index_of(name)?;
        self.raw(column).ok()
    }

    fn opt_raw_at(&self, column: usize) -> Option<Value> {
        if column >= self.backend.field_map().len() {
            return None;
        }
        self.raw(column).ok()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Total number of rows.
    pub fn row_count(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.backend.row_count())
    }

    /// Current position, `-1 ..= row_count`.
    pub fn position(&self) -> Result<i64> {
        self.ensure_open()?;
        Ok(self.position)
    }

    /// Whether the cursor sits on the before-first sentinel.
    pub fn is_before_first(&self) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.position < 0)
    }

    /// Whether the cursor sits on the after-last sentinel.
    pub fn is_after_last(&self) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.position >= self.backend.row_count() as i64)
    }

    /// Move to an absolute position.
    ///
    /// Out-of-range requests clamp to the nearest sentinel and return
    /// `false` rather than failing; `true` means the cursor now sits on a
    /// real row.
    pub fn move_to_position(&mut self, position: i64) -> Result<bool> {
        self.ensure_open()?;
        let count = self.backend.row_count() as i64;
        self.position = position.clamp(-1, count);
        Ok(position >= 0 && position < count)
    }

    /// Move to the first row; `false` when the result is empty.
    pub fn move_to_first(&mut self) -> Result<bool> {
        self.move_to_position(0)
    }

    /// Move to the last row; `false` when the result is empty.
    pub fn move_to_last(&mut self) -> Result<bool> {
        self.ensure_open()?;
        let count = self.backend.row_count() as i64;
        self.move_to_position(count - 1)
    }

    /// Advance one row; `false` once past the end.
    pub fn move_to_next(&mut self) -> Result<bool> {
        let position = self.position;
        self.move_to_position(position + 1)
    }

    /// Step back one row; `false` once before the start.
    pub fn move_to_previous(&mut self) -> Result<bool> {
        let position = self.position;
        self.move_to_position(position - 1)
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Column names in index order.
    pub fn column_names(&self) -> Result<&[String]> {
        self.ensure_open()?;
        Ok(self.backend.field_map().names())
    }

    /// Index of a column name, `-1` when absent. Never fails while open.
    pub fn column_index(&self, name: &str) -> Result<i64> {
        self.ensure_open()?;
        Ok(self
            .backend
            .field_map()
            .index_of(name)
            .map_or(-1, |i| i as i64))
    }

    /// The attached query description, if one was provided.
    pub fn query_description(&self) -> Result<Option<Arc<dyn QueryDescription>>> {
        self.ensure_open()?;
        Ok(self.description.clone())
    }

    // ------------------------------------------------------------------
    // Strict typed gets
    // ------------------------------------------------------------------

    /// Get a string column.
    pub fn get_string(&self, column: &str) -> Result<String> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        coerce::to_string(&self.raw(idx)?)
    }

    /// Get a string column by index.
    pub fn get_string_at(&self, column: usize) -> Result<String> {
        self.ensure_open()?;
        self.check_column(column)?;
        coerce::to_string(&self.raw(column)?)
    }

    /// Get an `i32` column.
    pub fn get_int(&self, column: &str) -> Result<i32> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        coerce::to_i32(&self.raw(idx)?)
    }

    /// Get an `i32` column by index.
    pub fn get_int_at(&self, column: usize) -> Result<i32> {
        self.ensure_open()?;
        self.check_column(column)?;
        coerce::to_i32(&self.raw(column)?)
    }

    /// Get an `i64` column.
    pub fn get_long(&self, column: &str) -> Result<i64> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        coerce::to_i64(&self.raw(idx)?)
    }

    /// Get an `i64` column by index.
    pub fn get_long_at(&self, column: usize) -> Result<i64> {
        self.ensure_open()?;
        self.check_column(column)?;
        coerce::to_i64(&self.raw(column)?)
    }

    /// Get an `f32` column.
    pub fn get_float(&self, column: &str) -> Result<f32> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        coerce::to_f32(&self.raw(idx)?)
    }

    /// Get an `f32` column by index.
    pub fn get_float_at(&self, column: usize) -> Result<f32> {
        self.ensure_open()?;
        self.check_column(column)?;
        coerce::to_f32(&self.raw(column)?)
    }

    /// Get an `f64` column.
    pub fn get_double(&self, column: &str) -> Result<f64> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        coerce::to_f64(&self.raw(idx)?)
    }

    /// Get an `f64` column by index.
    pub fn get_double_at(&self, column: usize) -> Result<f64> {
        self.ensure_open()?;
        self.check_column(column)?;
        coerce::to_f64(&self.raw(column)?)
    }

    /// Get a boolean column, resolved through the active truthiness
    /// policy. The policy is total, so the only failures here are a
    /// closed cursor, an unknown column, or a sentinel position.
    pub fn get_bool(&self, column: &str) -> Result<bool> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        Ok(self.bool_policy.resolve(&self.raw(idx)?))
    }

    /// Get a boolean column by index.
    pub fn get_bool_at(&self, column: usize) -> Result<bool> {
        self.ensure_open()?;
        self.check_column(column)?;
        Ok(self.bool_policy.resolve(&self.raw(column)?))
    }

    /// Get a byte-sequence column.
    pub fn get_blob(&self, column: &str) -> Result<Vec<u8>> {
        self.ensure_open()?;
        let idx = self.column_for(column)?;
        coerce::to_blob(&self.raw(idx)?)
    }

    /// Get a byte-sequence column by index.
    pub fn get_blob_at(&self, column: usize) -> Result<Vec<u8>> {
        self.ensure_open()?;
        self.check_column(column)?;
        coerce::to_blob(&self.raw(column)?)
    }

    // ------------------------------------------------------------------
    // Tolerant typed gets
    // ------------------------------------------------------------------

    /// String column or `fallback` on any data-shaped failure.
    pub fn opt_string(&self, column: &str, fallback: &str) -> Result<String> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .and_then(|v| coerce::to_string(&v).ok())
            .unwrap_or_else(|| fallback.to_string()))
    }

    /// String column by index or `fallback`.
    pub fn opt_string_at(&self, column: usize, fallback: &str) -> Result<String> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .and_then(|v| coerce::to_string(&v).ok())
            .unwrap_or_else(|| fallback.to_string()))
    }

    /// `i32` column or `fallback`.
    pub fn opt_int(&self, column: &str, fallback: i32) -> Result<i32> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .and_then(|v| coerce::to_i32(&v).ok())
            .unwrap_or(fallback))
    }

    /// `i32` column by index or `fallback`.
    pub fn opt_int_at(&self, column: usize, fallback: i32) -> Result<i32> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .and_then(|v| coerce::to_i32(&v).ok())
            .unwrap_or(fallback))
    }

    /// `i64` column or `fallback`.
    pub fn opt_long(&self, column: &str, fallback: i64) -> Result<i64> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .and_then(|v| coerce::to_i64(&v).ok())
            .unwrap_or(fallback))
    }

    /// `i64` column by index or `fallback`.
    pub fn opt_long_at(&self, column: usize, fallback: i64) -> Result<i64> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .and_then(|v| coerce::to_i64(&v).ok())
            .unwrap_or(fallback))
    }

    /// `f32` column or `fallback`.
    pub fn opt_float(&self, column: &str, fallback: f32) -> Result<f32> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .and_then(|v| coerce::to_f32(&v).ok())
            .unwrap_or(fallback))
    }

    /// `f32` column by index or `fallback`.
    pub fn opt_float_at(&self, column: usize, fallback: f32) -> Result<f32> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .and_then(|v| coerce::to_f32(&v).ok())
            .unwrap_or(fallback))
    }

    /// `f64` column or `fallback`.
    pub fn opt_double(&self, column: &str, fallback: f64) -> Result<f64> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .and_then(|v| coerce::to_f64(&v).ok())
            .unwrap_or(fallback))
    }

    /// `f64` column by index or `fallback`.
    pub fn opt_double_at(&self, column: usize, fallback: f64) -> Result<f64> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .and_then(|v| coerce::to_f64(&v).ok())
            .unwrap_or(fallback))
    }

    /// Boolean column or `fallback` when the column is unknown or the
    /// cursor sits on a sentinel.
    pub fn opt_bool(&self, column: &str, fallback: bool) -> Result<bool> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .map_or(fallback, |v| self.bool_policy.resolve(&v)))
    }

    /// Boolean column by index or `fallback`.
    pub fn opt_bool_at(&self, column: usize, fallback: bool) -> Result<bool> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .map_or(fallback, |v| self.bool_policy.resolve(&v)))
    }

    /// Byte-sequence column or `fallback`.
    pub fn opt_blob(&self, column: &str, fallback: &[u8]) -> Result<Vec<u8>> {
        self.ensure_open()?;
        Ok(self
            .opt_raw(column)
            .and_then(|v| coerce::to_blob(&v).ok())
            .unwrap_or_else(|| fallback.to_vec()))
    }

    /// Byte-sequence column by index or `fallback`.
    pub fn opt_blob_at(&self, column: usize, fallback: &[u8]) -> Result<Vec<u8>> {
        self.ensure_open()?;
        Ok(self
            .opt_raw_at(column)
            .and_then(|v| coerce::to_blob(&v).ok())
            .unwrap_or_else(|| fallback.to_vec()))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Release backend resources. Idempotent.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.backend.release();
            tracing::debug!(
                rows = self.backend.row_count(),
                columns = self.backend.field_map().len(),
                "cursor closed"
            );
        }
    }

    /// Whether `close()` has run.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<B: RowBackend> Drop for EasyCursor<B> {
    /// Backstop for scoped acquisition: abandonment on any exit path
    /// still releases the backend handle.
    fn drop(&mut self) {
        self.close();
    }
}
