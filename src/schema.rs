//! Table schemas
//!
//! A schema maps each table's columns to a field type and an optional
//! display name:
//!
//! ```yaml
//! tables:
//!   products:
//!     fields:
//!       id: { type: Text, displayName: ID }
//!       tags: { type: MultiSelect }
//! ```
//!
//! JSON in the same shape parses too. Columns the schema does not mention
//! use the Text editor.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::model::{ColumnDescriptor, FieldType};

/// Error loading a schema
#[derive(Debug)]
pub enum SchemaError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::Io { path, source } => {
                write!(f, "failed to read schema {}: {}", path.display(), source)
            }
            SchemaError::Parse(message) => write!(f, "invalid schema: {}", message),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Io { source, .. } => Some(source),
            SchemaError::Parse(_) => None,
        }
    }
}

/// One column entry
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: FieldType,
    pub display_name: Option<String>,
}

/// Columns of one table, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl TableSchema {
    pub fn field(&self, column: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == column)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableSchema>,
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    tables: Mapping,
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    fields: Mapping,
}

#[derive(Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    field_type: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

fn key_string(key: &Value) -> Result<String, SchemaError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        other => Err(SchemaError::Parse(format!(
            "expected a string key, found {:?}",
            other
        ))),
    }
}

fn parse_field_type(table: &str, column: &str, name: Option<&str>) -> FieldType {
    let Some(name) = name else {
        return FieldType::default();
    };
    match serde_yaml::from_value(Value::String(name.to_string())) {
        Ok(field_type) => field_type,
        Err(_) => {
            tracing::warn!(
                "Unknown field type '{}' for {}.{}, using Text",
                name,
                table,
                column
            );
            FieldType::default()
        }
    }
}

impl Schema {
    /// Parse a YAML or JSON schema document
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema =
            serde_yaml::from_str(text).map_err(|e| SchemaError::Parse(e.to_string()))?;

        let mut tables = Vec::with_capacity(raw.tables.len());
        for (table_key, table_value) in raw.tables {
            let table_name = key_string(&table_key)?;
            let raw_table: RawTable = serde_yaml::from_value(table_value)
                .map_err(|e| SchemaError::Parse(format!("table '{}': {}", table_name, e)))?;

            let mut fields = Vec::with_capacity(raw_table.fields.len());
            for (field_key, field_value) in raw_table.fields {
                let name = key_string(&field_key)?;
                let raw_field: RawField = serde_yaml::from_value(field_value).map_err(|e| {
                    SchemaError::Parse(format!("field '{}.{}': {}", table_name, name, e))
                })?;
                fields.push(FieldSchema {
                    field_type: parse_field_type(
                        &table_name,
                        &name,
                        raw_field.field_type.as_deref(),
                    ),
                    display_name: raw_field.display_name.filter(|s| !s.is_empty()),
                    name,
                });
            }
            tables.push(TableSchema {
                name: table_name,
                fields,
            });
        }
        Ok(Self { tables })
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::parse(&text)?;
        tracing::debug!(
            "Loaded schema {} ({} tables)",
            path.display(),
            schema.tables.len()
        );
        Ok(schema)
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn field(&self, table: &str, column: &str) -> Option<&FieldSchema> {
        self.table(table).and_then(|t| t.field(column))
    }

    /// Declared type, Text when the schema is silent
    pub fn field_type(&self, table: &str, column: &str) -> FieldType {
        self.field(table, column)
            .map(|f| f.field_type)
            .unwrap_or_default()
    }

    /// Column order: declared fields first, then any other seen columns
    pub fn column_order(&self, table: &str, seen: &[String]) -> Vec<String> {
        let mut order: Vec<String> = self
            .table(table)
            .map(|t| t.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default();
        for name in seen {
            if !order.contains(name) {
                order.push(name.clone());
            }
        }
        order
    }

    /// Descriptors for `columns` of `table`
    pub fn columns(&self, table: &str, columns: &[String], readonly: bool) -> Vec<ColumnDescriptor> {
        columns
            .iter()
            .map(|name| {
                let field = self.field(table, name);
                let descriptor = ColumnDescriptor::new(
                    table,
                    name.as_str(),
                    field.map(|f| f.field_type).unwrap_or_default(),
                )
                .with_readonly(readonly);
                match field.and_then(|f| f.display_name.as_deref()) {
                    Some(display_name) => descriptor.with_display_name(display_name),
                    None => descriptor,
                }
            })
            .collect()
    }
}
