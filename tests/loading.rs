//! Rows and schemas loaded from disk

use std::fs;

use cellgrid::loader::{self, LoadError};
use cellgrid::model::{CellValue, FieldType};
use cellgrid::schema::Schema;
use tempfile::tempdir;

const SCHEMA: &str = r#"
tables:
  orders:
    fields:
      id: { type: Text }
      customer: { type: Text, displayName: Customer }
      total: { type: Float }
      paid: { type: Boolean }
      state: { type: Wobbly }
"#;

#[test]
fn test_csv_rows_with_schema() {
    let dir = tempdir().unwrap();
    let rows_path = dir.path().join("orders.csv");
    let schema_path = dir.path().join("schema.yaml");
    fs::write(
        &rows_path,
        "total,customer,id,notes\n10.5,\"Doe, Jane\",1,\n3,Bob,2,rush\n",
    )
    .unwrap();
    fs::write(&schema_path, SCHEMA).unwrap();

    let loaded = loader::load(&rows_path).unwrap();
    assert_eq!(loaded.columns, vec!["total", "customer", "id", "notes"]);
    assert_eq!(loaded.rows.len(), 2);
    assert_eq!(loaded.rows[0]["customer"], CellValue::text("Doe, Jane"));
    assert_eq!(loaded.rows[0]["notes"], CellValue::Null);

    let schema = Schema::load(&schema_path).unwrap();
    let order = schema.column_order("orders", &loaded.columns);
    assert_eq!(order, vec!["id", "customer", "total", "paid", "state", "notes"]);

    let columns = schema.columns("orders", &order, false);
    assert_eq!(columns[1].display_name, "Customer");
    assert_eq!(columns[2].field_type, FieldType::Float);
    // Unknown types fall back to text
    assert_eq!(columns[4].field_type, FieldType::Text);
    assert_eq!(columns[5].field_type, FieldType::Text);
    assert!(!columns[0].is_editable());
}

#[test]
fn test_json_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rows.json");
    fs::write(
        &path,
        r#"[{"name": "a", "tags": ["x", "y"], "n": 2}, {"name": null, "ok": true}]"#,
    )
    .unwrap();

    let loaded = loader::load(&path).unwrap();
    assert_eq!(loaded.rows[0]["tags"], CellValue::list(["x", "y"]));
    assert_eq!(loaded.rows[0]["n"], CellValue::Number(2.0));
    assert_eq!(loaded.rows[1]["name"], CellValue::Null);
    assert_eq!(loaded.rows[1]["ok"], CellValue::Bool(true));
    assert!(loaded.columns.contains(&"ok".to_string()));
}

#[test]
fn test_load_errors() {
    let dir = tempdir().unwrap();

    let missing = loader::load(&dir.path().join("absent.json"));
    assert!(matches!(missing, Err(LoadError::Io { .. })));

    let bad_json = dir.path().join("bad.json");
    fs::write(&bad_json, "{ not rows").unwrap();
    assert!(matches!(loader::load(&bad_json), Err(LoadError::Json(_))));

    let bad_schema = dir.path().join("schema.yaml");
    fs::write(&bad_schema, "tables: [").unwrap();
    assert!(Schema::load(&bad_schema).is_err());
}

#[test]
fn test_readonly_flag_applies_to_every_column() {
    let schema = Schema::parse(SCHEMA).unwrap();
    let names = vec!["customer".to_string(), "paid".to_string()];
    let columns = schema.columns("orders", &names, true);
    assert!(columns.iter().all(|c| !c.is_editable()));
}
