//! Row loading
//!
//! Rows come from a JSON array of objects or from CSV with a header row.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::model::{CellValue, Row};

/// Error loading rows
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: std::io::Error },
    Json(String),
    Csv { message: String, line: Option<usize> },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Json(message) => write!(f, "invalid JSON rows: {}", message),
            LoadError::Csv {
                message,
                line: Some(line),
            } => write!(f, "CSV parse error at line {}: {}", line, message),
            LoadError::Csv { message, line: None } => write!(f, "CSV parse error: {}", message),
        }
    }
}

impl std::error::Error for LoadError {}

/// Rows plus the column names in the order they were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRows {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
}

fn seen_columns(rows: &[Row]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for name in row.keys() {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

/// Parse a JSON array of row objects
pub fn parse_json(content: &str) -> Result<LoadedRows, LoadError> {
    let rows: Vec<Row> =
        serde_json::from_str(content).map_err(|e| LoadError::Json(e.to_string()))?;
    let columns = seen_columns(&rows);
    Ok(LoadedRows { rows, columns })
}

/// Parse CSV with a header row
///
/// Uses the csv crate for RFC 4180 compliant parsing. Every cell is text;
/// empty cells are null.
pub fn parse_csv(content: &str) -> Result<LoadedRows, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Csv {
            message: e.to_string(),
            line: Some(1),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Csv {
            message: e.to_string(),
            line: Some(index + 2),
        })?;
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| {
                let value = if cell.is_empty() {
                    CellValue::Null
                } else {
                    CellValue::text(cell)
                };
                (name.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(LoadedRows { rows, columns })
}

/// Load rows from a file; `.csv` parses as CSV, anything else as JSON
pub fn load(path: &Path) -> Result<LoadedRows, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let loaded = if is_csv {
        parse_csv(&content)?
    } else {
        parse_json(&content)?
    };
    tracing::debug!(
        "Loaded {} rows ({} columns) from {}",
        loaded.rows.len(),
        loaded.columns.len(),
        path.display()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_values() {
        let loaded = parse_json(
            r#"[{"id": "1", "price": 4.5, "tags": ["a", "b"], "done": true, "note": null}]"#,
        )
        .unwrap();
        let row = &loaded.rows[0];
        assert_eq!(row["price"], CellValue::Number(4.5));
        assert_eq!(row["tags"], CellValue::list(["a", "b"]));
        assert_eq!(row["done"], CellValue::Bool(true));
        assert_eq!(row["note"], CellValue::Null);
    }

    #[test]
    fn test_parse_csv_keeps_header_order() {
        let loaded = parse_csv("name,id,desc\n\"A, Inc\",1,\nB,2,x\n").unwrap();
        assert_eq!(loaded.columns, vec!["name", "id", "desc"]);
        assert_eq!(loaded.rows.len(), 2);
        assert_eq!(loaded.rows[0]["name"], CellValue::text("A, Inc"));
        assert_eq!(loaded.rows[0]["desc"], CellValue::Null);
    }

    #[test]
    fn test_parse_json_error() {
        assert!(matches!(parse_json("{"), Err(LoadError::Json(_))));
    }
}
