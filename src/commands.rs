//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use serde::Serialize;

use crate::commit::AfterEditEvent;
use crate::messages::{CellMsg, Direction};
use crate::model::{CellPosition, EditKey};

/// Synthetic "move focus" signal, dispatched on the cell holding focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationSignal {
    #[serde(rename = "type")]
    pub name: &'static str,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl NavigationSignal {
    pub const NAME: &'static str = "navigate";

    pub fn new(from: CellPosition, direction: Direction) -> Self {
        Self {
            name: Self::NAME,
            row: from.row,
            col: from.col,
            direction,
        }
    }

    pub fn origin(&self) -> CellPosition {
        CellPosition::new(self.row, self.col)
    }
}

/// Events a cell emits towards the hosting grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GridEvent {
    AfterEdit(AfterEditEvent),
    Navigate(NavigationSignal),
}

/// A message scheduled for the next frame
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    /// Cell the message is delivered to
    pub target: EditKey,
    pub msg: CellMsg,
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw
    Redraw,
    /// Bubble an event up to the grid
    Emit(GridEvent),
    /// Run a message after layout settles
    Defer(Deferred),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn emit(event: GridEvent) -> Self {
        Cmd::Emit(event)
    }

    pub fn after_edit(event: AfterEditEvent) -> Self {
        Cmd::Emit(GridEvent::AfterEdit(event))
    }

    pub fn navigate(from: CellPosition, direction: Direction) -> Self {
        Cmd::Emit(GridEvent::Navigate(NavigationSignal::new(from, direction)))
    }

    pub fn defer(target: EditKey, msg: CellMsg) -> Self {
        Cmd::Defer(Deferred { target, msg })
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Emit(_) => true,
            Cmd::Defer(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn into_leaves(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_leaves).collect(),
            leaf => vec![leaf],
        }
    }
}
