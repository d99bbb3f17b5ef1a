//! Persist-and-replay: a model survives the trip through a key-value
//! store as its JSON envelope, field for field.

use std::collections::HashMap;

use easycursor::prelude::*;

/// Stand-in for an external key-value preference store.
#[derive(Default)]
struct KeyValueStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore {
    fn save(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn load(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

#[test]
fn select_model_survives_store_roundtrip() {
    let model = QueryModel::Select(
        SelectModelBuilder::new()
            .projection(&["id", "name", "age"])
            .tables("users")
            .selection("age >= ? AND country = ?")
            .selection_args(&["18", "GB"])
            .group_by("country")
            .having("count(*) > 2")
            .sort_order("name ASC")
            .limit("100")
            .distinct(true)
            .strict(true)
            .comment("adults by country")
            .tag("report-7")
            .version(2)
            .build()
            .expect("buildable model"),
    );

    let mut store = KeyValueStore::default();
    store.save("last_query", model.to_json().expect("serialize"));

    let stored: serde_json::Value =
        serde_json::from_str(store.load("last_query").expect("saved")).expect("valid JSON");
    assert_eq!(stored["type"], "select");
    assert_eq!(stored["version"], 2);

    let replayed =
        QueryModel::from_json(store.load("last_query").expect("saved")).expect("deserialize");
    assert_eq!(replayed, model);
}

#[test]
fn raw_model_survives_store_roundtrip() {
    let model = QueryModel::Raw(
        RawModelBuilder::new()
            .raw_sql("SELECT id FROM users WHERE name LIKE ?")
            .selection_args(&["A%"])
            .tag("by-prefix")
            .build()
            .expect("buildable model"),
    );

    let mut store = KeyValueStore::default();
    store.save("last_query", model.to_json().expect("serialize"));

    let replayed =
        QueryModel::from_json(store.load("last_query").expect("saved")).expect("deserialize");
    assert_eq!(replayed, model);
    assert_eq!(replayed.as_raw().unwrap().raw_sql(), model.to_sql());
}

#[test]
fn all_optional_fields_absent_roundtrip() {
    let model = QueryModel::Select(
        SelectModelBuilder::new().selection("1 = 1").build().unwrap(),
    );
    let replayed = QueryModel::from_json(&model.to_json().unwrap()).unwrap();
    assert_eq!(replayed, model);

    let select = replayed.as_select().unwrap();
    assert_eq!(select.projection(), None);
    assert_eq!(select.selection_args(), None);
    assert_eq!(select.tables(), None);
    assert_eq!(replayed.comment(), None);
    assert_eq!(replayed.tag(), None);
    assert_eq!(replayed.version(), 0);
}

#[test]
fn three_element_lists_roundtrip() {
    let model = QueryModel::Select(
        SelectModelBuilder::new()
            .tables("t")
            .projection(&["a", "b", "c"])
            .selection("a=? AND b=? AND c=?")
            .selection_args(&["1", "2", "3"])
            .build()
            .unwrap(),
    );
    let replayed = QueryModel::from_json(&model.to_json().unwrap()).unwrap();
    assert_eq!(replayed, model);
    assert_eq!(
        replayed.as_select().unwrap().selection_args(),
        Some(&["1".to_string(), "2".to_string(), "3".to_string()][..])
    );
}

#[test]
fn envelope_is_stable_against_foreign_keys() {
    // Stored envelopes may gain keys from newer versions; unknown keys
    // must not break replay.
    let replayed = QueryModel::from_json(
        r#"{"type":"select","tables":"t","some_future_field":123}"#,
    )
    .expect("tolerant decode");
    assert_eq!(replayed.as_select().unwrap().tables(), Some("t"));
}
