//! Command-line argument parsing for the replay driver
//!
//! Supports:
//! - Loading rows from JSON or CSV (built-in sample otherwise)
//! - A YAML/JSON schema for column types
//! - Replaying an interaction script against the grid

use clap::Parser;
use std::path::PathBuf;

use crate::sample::SAMPLE_TABLE;

/// Replay cell-editing interactions against a headless grid
#[derive(Parser, Debug)]
#[command(
    name = "cellgrid",
    version,
    about = "Replay cell-editing interactions against a headless grid"
)]
pub struct CliArgs {
    /// Rows to edit: a JSON array of objects or a CSV file with a header row
    #[arg(long, value_name = "FILE")]
    pub rows: Option<PathBuf>,

    /// Table schema (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Table name used for addressing and schema lookup
    #[arg(long, value_name = "NAME")]
    pub table: Option<String>,

    /// Interaction script to replay; reads stdin when omitted
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Make every column read-only
    #[arg(long)]
    pub readonly: bool,
}

/// Where rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSource {
    /// The built-in products table
    Sample,
    File(PathBuf),
}

/// Where the script comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Stdin,
    File(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub rows: RowSource,
    pub schema: Option<PathBuf>,
    pub table: String,
    pub script: ScriptSource,
    pub readonly: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let rows = match self.rows {
            Some(path) => RowSource::File(path),
            None => RowSource::Sample,
        };

        let table = match (&rows, self.table) {
            (_, Some(table)) if table.trim().is_empty() => {
                return Err("Table name cannot be empty".to_string())
            }
            (_, Some(table)) => table,
            (RowSource::Sample, None) => SAMPLE_TABLE.to_string(),
            (RowSource::File(path), None) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| format!("Cannot derive a table name from {}", path.display()))?,
        };

        let script = match self.script {
            Some(path) => ScriptSource::File(path),
            None => ScriptSource::Stdin,
        };

        Ok(RunConfig {
            rows,
            schema: self.schema,
            table,
            script,
            readonly: self.readonly,
        })
    }
}
