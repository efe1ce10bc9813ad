use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};

use cellgrid::cli::{CliArgs, RowSource, ScriptSource};
use cellgrid::config::GridConfig;
use cellgrid::grid::CellGrid;
use cellgrid::messages::GridMsg;
use cellgrid::model::RowStore;
use cellgrid::sample::{sample_columns, sample_rows, sample_schema};
use cellgrid::schema::Schema;
use cellgrid::{loader, script};

/// Upper bound on frames run after the script ends
const MAX_TRAILING_TICKS: usize = 8;

fn flush_events(grid: &mut CellGrid, out: &mut impl Write) -> Result<()> {
    for event in grid.take_events() {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    cellgrid::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    let grid_config = GridConfig::load();

    let (rows, seen_columns, builtin_schema) = match &config.rows {
        RowSource::Sample => (sample_rows(), sample_columns(), Some(sample_schema())),
        RowSource::File(path) => {
            let loaded = loader::load(path)
                .with_context(|| format!("Failed to load rows from {}", path.display()))?;
            (loaded.rows, loaded.columns, None)
        }
    };

    let schema = match &config.schema {
        Some(path) => Schema::load(path)
            .with_context(|| format!("Failed to load schema from {}", path.display()))?,
        None => builtin_schema.unwrap_or_default(),
    };
    let column_names = schema.column_order(&config.table, &seen_columns);
    let columns = schema.columns(&config.table, &column_names, config.readonly);

    let script_text = match &config.script {
        ScriptSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        ScriptSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            text
        }
    };
    let messages = script::parse(&script_text, &column_names)?;

    let store = RowStore::new(rows);
    let mut grid = CellGrid::new(&config.table, columns, store.clone(), &grid_config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for msg in messages {
        grid.update(msg);
        flush_events(&mut grid, &mut out)?;
    }

    // Let deferred work (Enter chains, overlay mounts) settle
    for _ in 0..MAX_TRAILING_TICKS {
        if grid.pending_tasks() == 0 {
            break;
        }
        grid.update(GridMsg::Tick);
        flush_events(&mut grid, &mut out)?;
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&store.snapshot())?)?;
    Ok(())
}
