//! JSON envelope conversion for query models.
//!
//! The envelope is a flat object: a `"type"` discriminator
//! (`"select"` / `"raw"`), the variant's fields, then the metadata
//! triple. Decoding reads the discriminator first and fails fast with
//! [`Error::MalformedModel`] before touching any variant field.
//!
//! Encoding rules, chosen so the round-trip law holds exactly:
//! - a `None` field omits its key; a JSON `null` on read is accepted as
//!   absent. Empty lists encode as `[]` and stay empty on read.
//! - the literal *string* `"null"` is an ordinary JSON string and
//!   round-trips losslessly; it is never conflated with JSON `null`.
//! - absent `version` decodes to 0; absent `distinct`/`strict` to false.
//!
//! Decoded models pass through the same mandatory-field validation the
//! builders run, so a structurally valid envelope that describes an
//! unbuildable model fails with
//! [`Error::IllegalModelState`](easycursor_core::Error::IllegalModelState).

use serde_json::Value as JsonValue;

use easycursor_core::{Error, Result};

use crate::model::{QueryModel, RawModel, SelectModel};

/// Discriminator key.
pub const TYPE_KEY: &str = "type";
/// Discriminator value for the select variant.
pub const TYPE_SELECT: &str = "select";
/// Discriminator value for the raw variant.
pub const TYPE_RAW: &str = "raw";

fn malformed(reason: impl Into<String>) -> Error {
    Error::MalformedModel {
        reason: reason.into(),
    }
}

/// Serialize a model to its JSON envelope.
pub fn to_json(model: &QueryModel) -> Result<String> {
    serde_json::to_string(model).map_err(|e| malformed(e.to_string()))
}

/// Reconstruct a model from its JSON envelope.
pub fn from_json(text: &str) -> Result<QueryModel> {
    let root: JsonValue =
        serde_json::from_str(text).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    let Some(object) = root.as_object() else {
        return Err(malformed("envelope is not a JSON object"));
    };
    let kind = match object.get(TYPE_KEY) {
        None => return Err(malformed(format!("missing discriminator '{TYPE_KEY}'"))),
        Some(JsonValue::String(kind)) => kind.clone(),
        Some(other) => {
            return Err(malformed(format!(
                "discriminator '{TYPE_KEY}' must be a string, got {other}"
            )));
        }
    };
    match kind.as_str() {
        TYPE_SELECT => {
            let model: SelectModel =
                serde_json::from_value(root).map_err(|e| malformed(e.to_string()))?;
            model.validate()?;
            Ok(QueryModel::Select(model))
        }
        TYPE_RAW => {
            let model: RawModel =
                serde_json::from_value(root).map_err(|e| malformed(e.to_string()))?;
            model.validate()?;
            Ok(QueryModel::Raw(model))
        }
        other => Err(malformed(format!("unknown discriminator '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{RawModelBuilder, SelectModelBuilder};

    fn roundtrip(model: &QueryModel) -> QueryModel {
        from_json(&to_json(model).unwrap()).unwrap()
    }

    #[test]
    fn test_roundtrip_minimal_select() {
        let model = QueryModel::Select(
            SelectModelBuilder::new().tables("users").build().unwrap(),
        );
        assert_eq!(roundtrip(&model), model);
    }

    #[test]
    fn test_roundtrip_fully_populated_select() {
        let model = QueryModel::Select(
            SelectModelBuilder::new()
                .projection(&["a", "b", "c"])
                .selection("a = ? AND b = ? AND c = ?")
                .selection_args(&["1", "2", "3"])
                .tables("t1, t2")
                .group_by("a")
                .having("count(*) > 1")
                .sort_order("a DESC")
                .limit("5")
                .distinct(true)
                .strict(true)
                .comment("a comment")
                .tag("a-tag")
                .version(3)
                .build()
                .unwrap(),
        );
        assert_eq!(roundtrip(&model), model);
    }

    #[test]
    fn test_roundtrip_raw() {
        let model = QueryModel::Raw(
            RawModelBuilder::new()
                .raw_sql("SELECT * FROM t WHERE id = ?")
                .selection_args(&["42"])
                .comment("replay me")
                .version(1)
                .build()
                .unwrap(),
        );
        assert_eq!(roundtrip(&model), model);
    }

    #[test]
    fn test_none_list_and_empty_list_stay_distinct() {
        let without = QueryModel::Select(
            SelectModelBuilder::new().tables("t").build().unwrap(),
        );
        let with_empty = QueryModel::Select(
            SelectModelBuilder::new()
                .tables("t")
                .selection_args(&[])
                .build()
                .unwrap(),
        );

        let without_json = to_json(&without).unwrap();
        let with_empty_json = to_json(&with_empty).unwrap();
        assert!(!without_json.contains("selection_args"));
        assert!(with_empty_json.contains(r#""selection_args":[]"#));

        let without_back = roundtrip(&without);
        let with_empty_back = roundtrip(&with_empty);
        assert_eq!(without_back, without);
        assert_eq!(with_empty_back, with_empty);
        assert_ne!(without_back, with_empty_back);
    }

    #[test]
    fn test_literal_null_string_roundtrips() {
        let model = QueryModel::Select(
            SelectModelBuilder::new()
                .tables("t")
                .comment("null")
                .build()
                .unwrap(),
        );
        let back = roundtrip(&model);
        assert_eq!(back.comment(), Some("null"));
    }

    #[test]
    fn test_json_null_reads_as_absent() {
        let model = from_json(r#"{"type":"select","tables":"t","comment":null}"#).unwrap();
        assert_eq!(model.comment(), None);
    }

    #[test]
    fn test_absent_version_defaults_to_zero() {
        let model = from_json(r#"{"type":"select","tables":"t"}"#).unwrap();
        assert_eq!(model.version(), 0);
        let select = model.as_select().unwrap();
        assert!(!select.is_distinct());
        assert!(!select.is_strict());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            from_json("not json"),
            Err(Error::MalformedModel { .. })
        ));
    }

    #[test]
    fn test_non_object_root_is_malformed() {
        assert!(matches!(
            from_json("[1,2,3]"),
            Err(Error::MalformedModel { .. })
        ));
    }

    #[test]
    fn test_missing_discriminator_is_malformed() {
        let err = from_json(r#"{"tables":"t"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedModel { .. }));
        assert!(err.to_string().contains("missing discriminator"));
    }

    #[test]
    fn test_unknown_discriminator_is_malformed() {
        let err = from_json(r#"{"type":"upsert","tables":"t"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown discriminator 'upsert'"));
    }

    #[test]
    fn test_decoded_raw_without_sql_is_illegal_model_state() {
        let err = from_json(r#"{"type":"raw"}"#).unwrap_err();
        assert_eq!(err, Error::IllegalModelState { field: "raw_sql" });
    }

    #[test]
    fn test_envelope_carries_discriminator() {
        let model = QueryModel::Raw(
            RawModelBuilder::new().raw_sql("SELECT 1").build().unwrap(),
        );
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&model).unwrap()).unwrap();
        assert_eq!(json[TYPE_KEY], TYPE_RAW);
        assert_eq!(json["raw_sql"], "SELECT 1");
    }
}
