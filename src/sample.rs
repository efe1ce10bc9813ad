//! Built-in products table used when no rows are given

use crate::model::{row, CellValue, Row};
use crate::schema::Schema;

pub const SAMPLE_TABLE: &str = "products";

pub const SAMPLE_SCHEMA: &str = r#"
tables:
  products:
    fields:
      id: { type: Text, displayName: ID }
      name: { type: Text, displayName: Product Name }
      status: { type: SingleSelect, displayName: Status }
      tags: { type: MultiSelect, displayName: Tags }
      description: { type: LongText, displayName: Description }
      price: { type: Number }
      quantity: { type: Number }
      category: { type: Badge }
      in_stock: { type: Boolean, displayName: In Stock }
"#;

pub fn sample_schema() -> Schema {
    // The embedded document is known to parse
    Schema::parse(SAMPLE_SCHEMA).unwrap_or_default()
}

pub fn sample_columns() -> Vec<String> {
    [
        "id",
        "name",
        "status",
        "tags",
        "description",
        "price",
        "quantity",
        "category",
        "in_stock",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    status: Option<&str>,
    tags: &[&str],
    price: Option<f64>,
) -> Row {
    let mut r = row([
        ("id", CellValue::text(id)),
        ("name", CellValue::text(name)),
        ("description", CellValue::text(description)),
    ]);
    if let Some(status) = status {
        r.insert("status".to_string(), CellValue::text(status));
    }
    if !tags.is_empty() {
        r.insert("tags".to_string(), CellValue::list(tags.iter().copied()));
    }
    if let Some(price) = price {
        r.insert("price".to_string(), CellValue::Number(price));
    }
    r
}

pub fn sample_rows() -> Vec<Row> {
    vec![
        product("1", "Product A", "This is product A", Some("Active"), &["New", "Featured"], Some(19.99)),
        product("2", "Product B", "This is product B", Some("Active"), &["Clearance"], Some(5.0)),
        product("3", "Product C", "This is product C", Some("Inactive"), &["Legacy"], None),
        product(
            "4",
            "Very Long Description Item",
            "This product has a very long description to test multi-line editing in the text cell. It should wrap across multiple lines when the editor opens.",
            None,
            &[],
            None,
        ),
        product("5", "Negative Stock", "Negative values to test numeric sanitization and display.", None, &[], Some(-12.5)),
        product("6", "Zero Price", "Zero price, large quantity.", None, &[], Some(0.0)),
        product("7", "Big Integer", "Very large integer value.", None, &[], Some(9007199254740991.0)),
        product("8", "High Precision", "High-precision decimal number.", None, &[], Some(3.14159265358979)),
        product("9", "Scientific Input", "Value entered as scientific notation to test formatting.", None, &[], Some(1.5e-7)),
        product("10", "Edge Case Text", "   Text with leading and trailing spaces to test trimming.   ", None, &[], None),
        product("11", "Empty Description", "", None, &[], None),
        product("12", "Unicode 商品", "Row containing unicode characters in the name.", None, &[], None),
        product("13", "Emoji 😀 Product", "Row with emoji in the name to test rendering.", None, &[], None),
    ]
}
