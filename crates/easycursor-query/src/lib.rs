//! Query models and builders for EasyCursor.
//!
//! A query model is an immutable, serializable description of how a
//! result set was (or should be) produced: either structured
//! SELECT-style parameters or an opaque raw query string, each carrying
//! a user metadata triple (comment, tag, version).
//!
//! - [`builder`] accumulates fields and validates on `build()`.
//! - [`json`] converts models to and from a discriminated JSON envelope,
//!   so a previously run query can be persisted and replayed.
//! - [`engine`] is the seam to the external engine that actually runs a
//!   model.
//!
//! Models implement [`easycursor_core::QueryDescription`], so a cursor
//! can carry the model that produced its rows.

pub mod builder;
pub mod engine;
pub mod json;
pub mod model;

pub use builder::{RawModelBuilder, SelectModelBuilder};
pub use engine::SqlEngine;
pub use model::{QueryModel, RawModel, SelectModel};
