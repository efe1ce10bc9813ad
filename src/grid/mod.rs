//! Headless grid host
//!
//! Stands in for the grid engine around the editing core:
//! - owns the row store, the columns and the pixel layout
//! - keeps live controllers for visible cells only, plus the editing cell
//! - routes keys and pastes to the cell they target
//! - runs deferred tasks one frame at a time
//!
//! ```text
//! CellGrid
//! ├── RowStore (shared with every controller)
//! ├── GridLayout (Surface)
//! ├── controllers: visible cells + editing cell
//! └── deferred: next-frame queue
//! ```

mod navigation;
mod viewport;

use std::collections::{BTreeMap, VecDeque};

pub use navigation::step;
pub use viewport::GridViewport;

use crate::commands::{Cmd, Deferred, GridEvent};
use crate::config::GridConfig;
use crate::controller::CellController;
use crate::coordinator::EditingCoordinator;
use crate::display::{self, CellDisplay};
use crate::keymap::{KeyCode, Keystroke};
use crate::messages::{CellMsg, Direction, GridMsg};
use crate::model::{CellAddress, CellPosition, ColumnDescriptor, EditKey, RowStore};
use crate::overlay::OverlayMetrics;
use crate::surface::GridLayout;

pub struct CellGrid {
    table: String,
    rows: RowStore,
    columns: Vec<ColumnDescriptor>,
    layout: GridLayout,
    coordinator: EditingCoordinator,
    metrics: OverlayMetrics,
    controllers: BTreeMap<CellPosition, CellController>,
    focus: Option<CellPosition>,
    deferred: VecDeque<Deferred>,
    events: Vec<GridEvent>,
    dirty: bool,
}

impl CellGrid {
    /// Grid on the process-wide edit slot
    pub fn new(
        table: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        rows: RowStore,
        config: &GridConfig,
    ) -> Self {
        Self::with_coordinator(table, columns, rows, config, EditingCoordinator::global())
    }

    pub fn with_coordinator(
        table: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        rows: RowStore,
        config: &GridConfig,
        coordinator: EditingCoordinator,
    ) -> Self {
        let table = table.into();
        let mut layout = GridLayout::new(table.clone(), config);
        layout.set_columns(
            columns
                .iter()
                .map(|c| (c.name.clone(), config.column_width_for(&c.name))),
        );
        layout.set_row_count(rows.len());

        let mut grid = Self {
            table,
            rows,
            columns,
            layout,
            coordinator,
            metrics: config.overlay_metrics(),
            controllers: BTreeMap::new(),
            focus: None,
            deferred: VecDeque::new(),
            events: Vec::new(),
            dirty: false,
        };
        grid.virtualize();
        tracing::debug!(
            "Grid '{}' ready: {} rows x {} columns, {} live cells",
            grid.table,
            grid.rows.len(),
            grid.columns.len(),
            grid.controllers.len()
        );
        grid
    }

    // === Accessors ===

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn coordinator(&self) -> &EditingCoordinator {
        &self.coordinator
    }

    pub fn focus(&self) -> Option<CellPosition> {
        self.focus
    }

    pub fn controller(&self, pos: CellPosition) -> Option<&CellController> {
        self.controllers.get(&pos)
    }

    /// Number of live controllers
    pub fn live_cells(&self) -> usize {
        self.controllers.len()
    }

    pub fn editing_position(&self) -> Option<CellPosition> {
        self.controllers
            .iter()
            .find(|(_, c)| c.is_editing())
            .map(|(pos, _)| *pos)
    }

    pub fn editing(&self) -> Option<&CellController> {
        self.controllers.values().find(|c| c.is_editing())
    }

    /// How many cells report editing right now
    pub fn editing_count(&self) -> usize {
        self.controllers.values().filter(|c| c.is_editing()).count()
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// What a cell shows, whether or not it has a live controller
    pub fn display(&self, pos: CellPosition) -> Option<CellDisplay> {
        if let Some(controller) = self.controllers.get(&pos) {
            return Some(controller.display());
        }
        let column = self.columns.get(pos.col)?;
        let value = self.rows.get(pos.row, &column.name)?;
        Some(display::render(column.editor_kind(), &value, pos.row))
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.rows.len() && pos.col < self.columns.len()
    }

    // === Update ===

    pub fn update(&mut self, msg: GridMsg) -> Option<Cmd> {
        self.dirty = false;
        match msg {
            GridMsg::Click { row, col } => self.pointer(CellPosition::new(row, col), CellMsg::Click),
            GridMsg::DoubleClick { row, col } => {
                self.pointer(CellPosition::new(row, col), CellMsg::DoubleClick)
            }
            GridMsg::Toggle { row, col } => {
                self.pointer(CellPosition::new(row, col), CellMsg::Toggle)
            }
            GridMsg::Focus { row, col } => {
                let pos = CellPosition::new(row, col);
                if self.contains(pos) {
                    self.set_focus(pos);
                    self.dirty = true;
                }
            }
            GridMsg::Key(stroke) => self.route_key(stroke),
            GridMsg::Paste { row, col, text } => {
                let pos = CellPosition::new(row, col);
                if self.contains(pos) {
                    if self.editing_position() != Some(pos) {
                        self.set_focus(pos);
                    }
                    self.send(pos, CellMsg::Paste(text));
                }
            }
            GridMsg::Type(text) => self.to_editing(CellMsg::InsertText(text)),
            GridMsg::Blur => self.to_editing(CellMsg::Blur),
            GridMsg::OutsideClick => self.to_editing(CellMsg::OutsideClick),
            GridMsg::Pick(option) => self.to_editing(CellMsg::SelectOption(option)),
            GridMsg::Unpick(option) => self.to_editing(CellMsg::DeselectOption(option)),
            GridMsg::ClearSelection => self.to_editing(CellMsg::ClearSelection),
            GridMsg::Scroll { dy, dx } => {
                if self.layout.scroll_by(dy, dx) {
                    self.layout_changed();
                    self.dirty = true;
                }
            }
            GridMsg::Resize { width, height } => {
                if self.layout.resize(width, height) {
                    self.layout_changed();
                    self.dirty = true;
                }
            }
            GridMsg::Tick => {
                self.tick();
            }
        }
        self.dirty.then_some(Cmd::Redraw)
    }

    /// Run every task deferred so far; tasks they defer wait for the next tick
    pub fn tick(&mut self) -> usize {
        let tasks: Vec<Deferred> = self.deferred.drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            match self.position_of(&task.target) {
                Some(pos) => {
                    self.send(pos, task.msg);
                }
                None => tracing::trace!("Dropped deferred {} for {}", task.msg.name(), task.target),
            }
        }
        count
    }

    fn pointer(&mut self, pos: CellPosition, msg: CellMsg) {
        if !self.contains(pos) {
            return;
        }
        self.set_focus(pos);
        self.dirty = true;
        self.send(pos, msg);
    }

    fn route_key(&mut self, stroke: Keystroke) {
        if let Some(pos) = self.editing_position() {
            // The editing cell swallows every key
            self.send(pos, CellMsg::EditorKey(stroke));
            return;
        }
        let Some(focus) = self.focus else {
            return;
        };
        if self.send(focus, CellMsg::GridKey(stroke)) {
            return;
        }
        let direction = match stroke.key {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Tab if stroke.mods.shift() => Direction::Left,
            KeyCode::Tab => Direction::Right,
            _ => return,
        };
        self.move_focus(focus, direction);
        self.dirty = true;
    }

    fn to_editing(&mut self, msg: CellMsg) {
        match self.editing_position() {
            Some(pos) => {
                self.send(pos, msg);
            }
            None => tracing::trace!("No editing cell for {}", msg.name()),
        }
    }

    /// Deliver a message to one cell; returns whether the cell handled it
    pub(super) fn send(&mut self, pos: CellPosition, msg: CellMsg) -> bool {
        if !self.ensure_controller(pos) {
            return false;
        }
        let cmd = match self.controllers.get_mut(&pos) {
            Some(controller) => controller.update(msg, &self.layout),
            None => None,
        };
        match cmd {
            Some(cmd) => {
                self.run(cmd);
                true
            }
            None => false,
        }
    }

    fn run(&mut self, cmd: Cmd) {
        for leaf in cmd.into_leaves() {
            match leaf {
                Cmd::Redraw => self.dirty = true,
                Cmd::Emit(event) => {
                    self.dirty = true;
                    if let GridEvent::Navigate(signal) = &event {
                        self.move_focus(signal.origin(), signal.direction);
                    }
                    self.events.push(event);
                }
                Cmd::Defer(task) => self.deferred.push_back(task),
                Cmd::None | Cmd::Batch(_) => {}
            }
        }
    }

    // === Virtualization ===

    fn make_controller(&self, pos: CellPosition) -> Option<CellController> {
        let column = self.columns.get(pos.col)?;
        if pos.row >= self.rows.len() {
            return None;
        }
        Some(CellController::new(
            column.clone(),
            pos.row,
            pos.col,
            self.rows.clone(),
            self.coordinator.clone(),
            self.metrics,
        ))
    }

    fn ensure_controller(&mut self, pos: CellPosition) -> bool {
        if self.controllers.contains_key(&pos) {
            return true;
        }
        match self.make_controller(pos) {
            Some(controller) => {
                self.controllers.insert(pos, controller);
                true
            }
            None => false,
        }
    }

    /// Keep controllers for visible cells, the editing cell, and cells
    /// with an Enter chain in flight
    pub(super) fn virtualize(&mut self) {
        self.layout.set_row_count(self.rows.len());
        let rows = self.layout.visible_rows();
        let cols = self.layout.visible_columns();
        let visible = |pos: &CellPosition| rows.contains(&pos.row) && cols.contains(&pos.col);

        self.controllers
            .retain(|pos, c| visible(pos) || c.is_editing() || c.is_enter_guard_armed());

        let missing: Vec<CellPosition> = rows
            .clone()
            .flat_map(|row| cols.clone().map(move |col| CellPosition::new(row, col)))
            .filter(|pos| !self.controllers.contains_key(pos))
            .collect();
        for pos in missing {
            self.ensure_controller(pos);
        }
    }

    fn position_of(&self, key: &EditKey) -> Option<CellPosition> {
        if let Some((pos, _)) = self.controllers.iter().find(|(_, c)| c.key() == key) {
            return Some(*pos);
        }
        // Names may contain ':', so match whole keys rather than splitting
        let row = key.row()?;
        let col = self.columns.iter().position(|c| {
            CellAddress::new(c.table.as_str(), c.name.as_str(), row).edit_key() == *key
        })?;
        Some(CellPosition::new(row, col))
    }
}
