//! The same logical rows behave identically through all three backends.

use easycursor::prelude::*;

struct InlineRows {
    names: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowSet for InlineRows {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn value(&self, row: usize, column: usize) -> Value {
        self.rows[row][column].clone()
    }
}

struct City {
    name: String,
    population: i64,
}

impl Record for City {
    fn descriptor() -> FieldDescriptor<Self> {
        FieldDescriptor::new()
            .field("getName", |c: &City| Value::from(c.name.clone()))
            .field("getPopulation", |c: &City| Value::from(c.population))
    }
}

fn collect<B: RowBackend>(mut cursor: EasyCursor<B>) -> Vec<(String, i64)> {
    let mut out = Vec::new();
    while cursor.move_to_next().expect("open cursor") {
        out.push((
            cursor.get_string("name").expect("name"),
            cursor.get_long("population").expect("population"),
        ));
    }
    out
}

#[test]
fn typed_access_is_uniform_across_backends() {
    let expected = vec![
        ("Lisbon".to_string(), 545_000_i64),
        ("Porto".to_string(), 232_000_i64),
    ];

    let sql = EasyCursor::new(SqlBackend::new(Box::new(InlineRows {
        names: vec!["name".to_string(), "population".to_string()],
        rows: vec![
            vec![Value::Text("Lisbon".to_string()), Value::Int(545_000)],
            vec![Value::Text("Porto".to_string()), Value::Int(232_000)],
        ],
    })));

    let json = EasyCursor::new(
        JsonBackend::from_str(
            r#"[{"name":"Lisbon","population":545000},{"name":"Porto","population":232000}]"#,
        )
        .expect("valid rows"),
    );

    let objects = EasyCursor::new(ObjectBackend::new(vec![
        City {
            name: "Lisbon".to_string(),
            population: 545_000,
        },
        City {
            name: "Porto".to_string(),
            population: 232_000,
        },
    ]));

    assert_eq!(collect(sql), expected);
    assert_eq!(collect(json), expected);
    assert_eq!(collect(objects), expected);
}

#[test]
fn opt_family_masks_backend_differences() {
    let mut json = EasyCursor::new(JsonBackend::from_str(r#"[{"a":1}]"#).unwrap());
    let mut objects = EasyCursor::new(ObjectBackend::new(vec![City {
        name: "x".to_string(),
        population: 0,
    }]));

    json.move_to_first().unwrap();
    objects.move_to_first().unwrap();

    // Neither backend has this column; both tolerate the miss the same way.
    assert_eq!(json.opt_int("missing", 7).unwrap(), 7);
    assert_eq!(objects.opt_int("missing", 7).unwrap(), 7);
    assert_eq!(json.column_index("missing").unwrap(), -1);
    assert_eq!(objects.column_index("missing").unwrap(), -1);
}
