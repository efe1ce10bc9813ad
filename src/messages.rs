//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use serde::Serialize;

use crate::keymap::Keystroke;

/// Direction for focus movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Messages handled by a single cell controller
#[derive(Debug, Clone, PartialEq)]
pub enum CellMsg {
    // === Pointer ===
    /// Single click on the cell
    Click,
    /// Double click on the cell
    DoubleClick,
    /// Pointer pressed outside the open overlay
    OutsideClick,

    // === Keyboard ===
    /// Global keydown whose target is this (focused) cell
    GridKey(Keystroke),
    /// Keydown inside this cell's open editor
    EditorKey(Keystroke),
    /// Text inserted into the open editor at the caret
    InsertText(String),
    /// Paste whose target is this cell; opens the editor when idle
    Paste(String),
    /// The open editor lost focus
    Blur,

    // === Layout ===
    /// The grid scrolled or resized; re-measure the anchor
    LayoutChanged,

    // === Deferred (run on the next frame) ===
    /// Second pass after the overlay mounted: width, focus, caret
    OverlayMounted,
    /// Finish an Enter commit by moving focus down
    FinishEnterChain,

    // === Field-specific ===
    /// Flip a boolean cell
    Toggle,
    /// Pick an option in an open dropdown
    SelectOption(String),
    /// Remove an option from an open multi-select dropdown
    DeselectOption(String),
    /// The dropdown's "Clear" action
    ClearSelection,
    /// The dropdown's "Close" action
    CloseDropdown,
}

impl CellMsg {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            CellMsg::Click => "click",
            CellMsg::DoubleClick => "dblclick",
            CellMsg::OutsideClick => "outside",
            CellMsg::GridKey(_) => "grid-key",
            CellMsg::EditorKey(_) => "editor-key",
            CellMsg::InsertText(_) => "insert",
            CellMsg::Paste(_) => "paste",
            CellMsg::Blur => "blur",
            CellMsg::LayoutChanged => "layout",
            CellMsg::OverlayMounted => "overlay-mounted",
            CellMsg::FinishEnterChain => "finish-enter",
            CellMsg::Toggle => "toggle",
            CellMsg::SelectOption(_) => "select",
            CellMsg::DeselectOption(_) => "deselect",
            CellMsg::ClearSelection => "clear",
            CellMsg::CloseDropdown => "close",
        }
    }
}

/// Messages handled by the grid host
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    /// Click on a cell
    Click { row: usize, col: usize },
    /// Double click on a cell
    DoubleClick { row: usize, col: usize },
    /// Move grid focus to a cell without opening it
    Focus { row: usize, col: usize },
    /// Keydown; goes to the editing cell if any, else the focused cell
    Key(Keystroke),
    /// Paste with an explicit target cell
    Paste { row: usize, col: usize, text: String },
    /// Text typed into the open editor
    Type(String),
    /// Focus left the open editor
    Blur,
    /// Pointer pressed somewhere outside the open overlay
    OutsideClick,
    /// Scroll the grid body by a pixel delta
    Scroll { dy: f32, dx: f32 },
    /// Resize the grid container
    Resize { width: f32, height: f32 },
    /// Click the checkbox of a boolean cell
    Toggle { row: usize, col: usize },
    /// Pick a dropdown option in the open select editor
    Pick(String),
    /// Deselect a dropdown option in the open multi-select editor
    Unpick(String),
    /// The dropdown's "Clear" action
    ClearSelection,
    /// Run every deferred task queued so far (one frame)
    Tick,
}
