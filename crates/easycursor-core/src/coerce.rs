//! The type coercion engine.
//!
//! Converts a raw [`Value`] into one of the seven primitive result types:
//! `String`, `i32`, `i64`, `f32`, `f64`, `bool`, and `Vec<u8>`.
//!
//! The strict functions here never substitute defaults: a text value that
//! fails to parse as a number is an [`Error::Conversion`] naming the
//! offending value and the requested target. Null is likewise a
//! conversion error on every strict target — "present but null" is
//! distinguished from "no such column", which the cursor reports
//! separately.
//!
//! Booleans are intentionally not coerced here. Truthiness is a
//! backend-pluggable capability ([`BoolPolicy`]) because the encodings
//! differ: relational engines store `1`/`0` integers, JSON documents
//! carry native booleans or `"true"` strings, object collections carry
//! native booleans. Each backend supplies its default policy and callers
//! may swap it on the cursor.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::Value;

fn conversion_error(value: &Value, target: &'static str) -> Error {
    Error::Conversion {
        value: value.to_string(),
        target,
    }
}

/// Coerce to an owned string.
///
/// Numbers and booleans render via `Display`. Null and blobs are
/// conversion errors: there is no implicit charset decode for bytes.
pub fn to_string(value: &Value) -> Result<String> {
    match value {
        Value::Text(s) => Ok(s.clone()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Blob(_) => Err(conversion_error(value, "String")),
    }
}

/// Coerce to `i64`. Floats truncate; text parses.
pub fn to_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(f) => Ok(*f as i64),
        Value::Text(s) => s
            .parse::<i64>()
            .map_err(|_| conversion_error(value, "i64")),
        _ => Err(conversion_error(value, "i64")),
    }
}

/// Coerce to `i32`. Integers narrow with cast semantics; text parses at
/// the target width, so an overflowing literal is a conversion error.
pub fn to_i32(value: &Value) -> Result<i32> {
    match value {
        Value::Int(i) => Ok(*i as i32),
        Value::Float(f) => Ok(*f as i32),
        Value::Text(s) => s
            .parse::<i32>()
            .map_err(|_| conversion_error(value, "i32")),
        _ => Err(conversion_error(value, "i32")),
    }
}

/// Coerce to `f64`.
pub fn to_f64(value: &Value) -> Result<f64> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Int(i) => Ok(*i as f64),
        Value::Text(s) => s
            .parse::<f64>()
            .map_err(|_| conversion_error(value, "f64")),
        _ => Err(conversion_error(value, "f64")),
    }
}

/// Coerce to `f32`.
pub fn to_f32(value: &Value) -> Result<f32> {
    match value {
        Value::Float(f) => Ok(*f as f32),
        Value::Int(i) => Ok(*i as f32),
        Value::Text(s) => s
            .parse::<f32>()
            .map_err(|_| conversion_error(value, "f32")),
        _ => Err(conversion_error(value, "f32")),
    }
}

/// Coerce to a byte sequence. Text yields its UTF-8 bytes; numerics are
/// conversion errors rather than guessing an encoding.
pub fn to_blob(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::Blob(b) => Ok(b.clone()),
        Value::Text(s) => Ok(s.clone().into_bytes()),
        _ => Err(conversion_error(value, "Vec<u8>")),
    }
}

/// Backend-pluggable boolean truthiness.
///
/// `resolve` is total: every raw value maps to a boolean, so `get_bool`
/// never fails with a conversion error. Swap the policy on the cursor to
/// support alternate encodings.
pub trait BoolPolicy: fmt::Debug + Send + Sync {
    /// Resolve a raw value to a boolean.
    fn resolve(&self, value: &Value) -> bool;
}

/// Relational truthiness: an integer column value of exactly 1 is true,
/// anything else (including null) is false.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlBoolPolicy;

impl BoolPolicy for SqlBoolPolicy {
    fn resolve(&self, value: &Value) -> bool {
        matches!(value, Value::Int(1))
    }
}

/// JSON truthiness: native booleans pass through, the integer 1 and the
/// case-insensitive text `"true"` also count as true.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBoolPolicy;

impl BoolPolicy for JsonBoolPolicy {
    fn resolve(&self, value: &Value) -> bool {
        match value {
            Value::Bool(b) => *b,
            Value::Int(i) => *i == 1,
            Value::Text(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Object-collection truthiness: only a native `true` is true.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectBoolPolicy;

impl BoolPolicy for ObjectBoolPolicy {
    fn resolve(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(true))
    }
}
