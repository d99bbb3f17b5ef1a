//! Core types and traits for EasyCursor.
//!
//! `easycursor-core` is the **foundation layer** for the workspace. It
//! defines the cursor contract and the data types every backend shares.
//!
//! # Role In The Architecture
//!
//! - **Contract layer**: [`RowBackend`] is the capability interface a
//!   backend implements; [`RowSet`] is the narrower collaborator trait a
//!   relational engine fulfills.
//! - **Data model**: [`Value`] is the raw backend value, the [`coerce`]
//!   module turns it into the seven typed results, and [`FieldMap`] maps
//!   field names to stable column indexes.
//! - **Surface**: [`EasyCursor`] wraps any backend and exposes identical
//!   navigation and typed access, optionally carrying the
//!   [`QueryDescription`] that produced its rows.
//!
//! # Who Uses This Crate
//!
//! - `easycursor-query` implements [`QueryDescription`] for its models
//!   and defines the engine collaborator that yields a [`RowSet`].
//! - `easycursor-json` and `easycursor-object` implement [`RowBackend`]
//!   for JSON arrays and object collections.
//!
//! Most applications should use the `easycursor` facade; reach for
//! `easycursor-core` directly when writing a backend.

pub mod backend;
pub mod coerce;
pub mod cursor;
pub mod description;
pub mod error;
pub mod field;
pub mod sql;
pub mod value;

pub use backend::RowBackend;
pub use coerce::{BoolPolicy, JsonBoolPolicy, ObjectBoolPolicy, SqlBoolPolicy};
pub use cursor::EasyCursor;
pub use description::QueryDescription;
pub use error::{Error, Result};
pub use field::{CaseMode, FieldMap};
pub use sql::{RowSet, SqlBackend};
pub use value::Value;
