//! cellgrid - editable cells for virtualized grids
//!
//! This crate provides the editing core behind a tabular grid: a single
//! edit slot shared by every cell, per-cell controllers implementing the
//! Elm Architecture pattern, floating overlay positioning, and the
//! commit/cancel/navigate protocol every field editor follows.

pub mod cli;
pub mod commands;
pub mod commit;
pub mod config;
pub mod config_paths;
pub mod controller;
pub mod coordinator;
pub mod display;
pub mod editable;
pub mod geometry;
pub mod grid;
pub mod keymap;
pub mod loader;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod sample;
pub mod schema;
pub mod script;
pub mod surface;
pub mod tracing;
pub mod transform;

// Re-export commonly used types
pub use commands::{Cmd, GridEvent};
pub use config::GridConfig;
pub use controller::CellController;
pub use coordinator::EditingCoordinator;
pub use grid::CellGrid;
pub use messages::{CellMsg, GridMsg};
pub use model::{CellValue, ColumnDescriptor, RowStore};
