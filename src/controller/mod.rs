//! Per-cell controller
//!
//! One controller per live cell. It reads its value from the shared row
//! store, asks the coordinator for the edit slot when a gesture opens it,
//! owns the open editor and its overlay, and runs the commit/cancel
//! protocol. Controllers never reference each other: losing the slot to
//! another cell is observed through a coordinator subscription and acted
//! on lazily, at the start of the next update.

pub mod editor;
pub mod select;

use std::cell::Cell;
use std::rc::Rc;

pub use editor::FieldEditor;
pub use select::{SelectAction, SelectEditor};

use crate::commands::Cmd;
use crate::commit::{save_value, try_save_value, AfterEditEvent};
use crate::coordinator::{EditingCoordinator, Subscription};
use crate::display::{self, CellDisplay};
use crate::keymap::{editing_intent, idle_intent, EditingIntent, EnterGuard, IdleIntent};
use crate::messages::{CellMsg, Direction};
use crate::model::{
    CellAddress, CellContext, CellValue, ColumnDescriptor, EditKey, EditorKind, RowStore,
    ID_COLUMN,
};
use crate::overlay::{OverlayFrame, OverlayMetrics, OverlayPositioner, Placement, WidthMode};
use crate::surface::Surface;
use crate::transform::{self, boolean, select as select_values};

/// Lifecycle of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Opening,
    Editing,
    Committing,
    Cancelling,
}

/// The editor mounted while a cell edits
#[derive(Debug, Clone)]
pub enum OpenEditor {
    Field(FieldEditor),
    Select(SelectEditor),
}

impl OpenEditor {
    pub fn positioner(&self) -> &OverlayPositioner {
        match self {
            OpenEditor::Field(ed) => ed.positioner(),
            OpenEditor::Select(dd) => dd.positioner(),
        }
    }

    pub fn positioner_mut(&mut self) -> &mut OverlayPositioner {
        match self {
            OpenEditor::Field(ed) => ed.positioner_mut(),
            OpenEditor::Select(dd) => dd.positioner_mut(),
        }
    }
}

/// State machine for one cell
pub struct CellController {
    column: ColumnDescriptor,
    context: CellContext,
    kind: EditorKind,
    key: EditKey,
    rows: RowStore,
    coordinator: EditingCoordinator,
    metrics: OverlayMetrics,
    phase: Phase,
    /// Whether the coordinator slot currently names this cell
    granted: Rc<Cell<bool>>,
    _subscription: Subscription,
    editor: Option<OpenEditor>,
    /// `id` of the row when the session opened
    open_row_id: CellValue,
    enter_guard: EnterGuard,
    pending_paste: Option<String>,
}

impl CellController {
    pub fn new(
        column: ColumnDescriptor,
        row_index: usize,
        col_index: usize,
        rows: RowStore,
        coordinator: EditingCoordinator,
        metrics: OverlayMetrics,
    ) -> Self {
        let address = CellAddress::new(&column.table, &column.name, row_index);
        let context = CellContext::new(&address, col_index, column.readonly);
        let key = address.edit_key();

        let granted = Rc::new(Cell::new(coordinator.is_active(&key)));
        let subscription = {
            let granted = Rc::clone(&granted);
            let key = key.clone();
            coordinator.subscribe(move |session| {
                granted.set(session.is_some_and(|s| s.key == key));
            })
        };

        Self {
            kind: column.editor_kind(),
            column,
            context,
            key,
            rows,
            coordinator,
            metrics,
            phase: Phase::Idle,
            granted,
            _subscription: subscription,
            editor: None,
            open_row_id: CellValue::Null,
            enter_guard: EnterGuard::default(),
            pending_paste: None,
        }
    }

    // === Accessors ===

    /// True only while this cell holds the edit slot and has an editor open
    pub fn is_editing(&self) -> bool {
        self.phase == Phase::Editing && self.granted.get()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn key(&self) -> &EditKey {
        &self.key
    }

    pub fn address(&self) -> CellAddress {
        self.context.address()
    }

    pub fn context(&self) -> &CellContext {
        &self.context
    }

    pub fn column(&self) -> &ColumnDescriptor {
        &self.column
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn editor(&self) -> Option<&OpenEditor> {
        self.editor.as_ref().filter(|_| self.is_editing())
    }

    pub fn overlay_frame(&self) -> Option<OverlayFrame> {
        self.editor().map(|ed| ed.positioner().frame())
    }

    pub fn width_mode(&self) -> Option<WidthMode> {
        self.editor().and_then(|ed| ed.positioner().width_mode())
    }

    /// Text in the open text, number or badge editor
    pub fn editor_text(&self) -> Option<&str> {
        match self.editor() {
            Some(OpenEditor::Field(ed)) => Some(ed.text()),
            _ => None,
        }
    }

    pub fn is_enter_guard_armed(&self) -> bool {
        self.enter_guard.is_armed()
    }

    /// Stored value; null when the row is gone
    pub fn value(&self) -> CellValue {
        self.rows
            .get(self.context.row_index, &self.context.column_name)
            .unwrap_or_default()
    }

    /// Current selections of a select cell
    pub fn selected(&self) -> Vec<String> {
        match self.editor() {
            Some(OpenEditor::Select(dd)) => dd.selections().to_vec(),
            _ => select_values::selections_of(&self.value(), self.is_multi_select()),
        }
    }

    /// Options offered by a select cell, derived from the live column values
    pub fn options(&self) -> Vec<String> {
        let values = self.rows.column_values(&self.context.column_name);
        select_values::options_universe(&values, &self.selected(), self.is_multi_select())
    }

    fn is_multi_select(&self) -> bool {
        matches!(self.kind, EditorKind::Select { multi: true })
    }

    /// What the idle cell shows
    pub fn display(&self) -> CellDisplay {
        display::render(self.kind, &self.value(), self.context.row_index)
    }

    // === Update ===

    /// Drop the editor if another cell took the slot
    ///
    /// Eviction runs neither commit nor cancel. Returns whether it happened.
    pub fn reconcile(&mut self) -> bool {
        if self.phase != Phase::Editing || self.granted.get() {
            return false;
        }
        tracing::debug!("{} evicted; editor dropped without commit", self.key);
        self.reset();
        true
    }

    pub fn update(&mut self, msg: CellMsg, surface: &dyn Surface) -> Option<Cmd> {
        self.reconcile();
        tracing::trace!("{} <- {}", self.key, msg.name());

        match msg {
            CellMsg::Click | CellMsg::DoubleClick => self.open(surface),
            CellMsg::GridKey(stroke) if !self.is_editing() => {
                match idle_intent(&stroke, &mut self.enter_guard) {
                    IdleIntent::Open if self.kind == EditorKind::Toggle => self.toggle(),
                    IdleIntent::Open => self.open(surface),
                    IdleIntent::Replay(direction) => {
                        tracing::debug!("{} replays Enter as move {:?}", self.key, direction);
                        Some(Cmd::navigate(self.context.position(), direction))
                    }
                    IdleIntent::Pass => None,
                }
            }
            CellMsg::GridKey(stroke) | CellMsg::EditorKey(stroke) => {
                if !self.is_editing() {
                    return None;
                }
                match editing_intent(&stroke, self.kind) {
                    EditingIntent::Commit { then } => self.commit(then),
                    EditingIntent::Cancel => self.cancel(),
                    EditingIntent::Edit => self.edit(surface, |ed| ed.apply_key(&stroke)),
                    EditingIntent::Ignore => Some(Cmd::Redraw),
                }
            }
            CellMsg::InsertText(text) => self.edit(surface, |ed| ed.insert_text(&text)),
            CellMsg::Paste(text) => {
                if self.is_editing() {
                    return self.edit(surface, |ed| ed.paste(&text));
                }
                let pastable = matches!(
                    self.kind,
                    EditorKind::Text | EditorKind::Number | EditorKind::Badge
                );
                if self.phase != Phase::Idle || !pastable {
                    return None;
                }
                self.pending_paste = Some(text);
                let cmd = self.open(surface);
                if cmd.is_none() {
                    self.pending_paste = None;
                }
                cmd
            }
            CellMsg::Blur => match &self.editor {
                Some(OpenEditor::Field(ed)) if self.is_editing() && ed.is_focused() => {
                    self.commit(None)
                }
                _ => None,
            },
            CellMsg::OutsideClick => match &self.editor {
                Some(OpenEditor::Field(_)) if self.is_editing() => self.commit(None),
                Some(OpenEditor::Select(_)) if self.is_editing() => self.cancel(),
                _ => None,
            },
            CellMsg::LayoutChanged => self.resync(surface),
            CellMsg::OverlayMounted => self.mounted(surface),
            CellMsg::FinishEnterChain => {
                if self.enter_guard.take() {
                    Some(Cmd::navigate(self.context.position(), Direction::Down))
                } else {
                    None
                }
            }
            CellMsg::Toggle => self.toggle(),
            CellMsg::SelectOption(option) => self.select_with(|dd| dd.pick(&option)),
            CellMsg::DeselectOption(option) => self.select_with(|dd| dd.unpick(&option)),
            CellMsg::ClearSelection => self.select_with(SelectEditor::clear),
            CellMsg::CloseDropdown => match &self.editor {
                Some(OpenEditor::Select(_)) => self.cancel(),
                _ => None,
            },
        }
    }

    // === Transitions ===

    fn open(&mut self, surface: &dyn Surface) -> Option<Cmd> {
        if self.phase != Phase::Idle {
            return None;
        }
        if !self.column.is_editable() {
            tracing::debug!("{} is not editable", self.key);
            return None;
        }
        let placement = Placement::for_kind(self.kind)?;
        let Some(anchor) = surface.cell_rect(&self.context.address()) else {
            tracing::warn!("{} has no layout; editor not opened", self.key);
            return None;
        };

        self.phase = Phase::Opening;
        let current = self.value();
        self.open_row_id = self.row_id();
        let seed = transform::seed(self.kind, &current);
        self.coordinator.set_active(self.key.clone(), seed.clone());
        self.phase = Phase::Editing;

        let positioner = OverlayPositioner::new(placement, anchor, self.metrics);
        self.editor = Some(match self.kind {
            EditorKind::Select { multi } => OpenEditor::Select(SelectEditor::new(
                multi,
                select_values::selections_of(&current, multi),
                positioner,
            )),
            kind => OpenEditor::Field(FieldEditor::new(kind, seed, positioner)),
        });
        tracing::debug!("{} opened ({:?})", self.key, self.kind);

        Some(Cmd::batch(vec![
            Cmd::Redraw,
            Cmd::defer(self.key.clone(), CellMsg::OverlayMounted),
        ]))
    }

    /// Second pass once the overlay is on screen
    fn mounted(&mut self, surface: &dyn Surface) -> Option<Cmd> {
        if !self.is_editing() {
            return None;
        }
        let pending = self.pending_paste.take();
        let injected = pending.is_some();
        let snapshot = match self.editor.as_mut()? {
            OpenEditor::Field(ed) => {
                ed.mount(surface.overlay_width(), pending);
                ed.autogrow(surface);
                injected.then(|| ed.text().to_string())
            }
            OpenEditor::Select(dd) => {
                dd.positioner_mut().resolve_width(surface.overlay_width());
                None
            }
        };
        if let Some(text) = snapshot {
            self.coordinator.update_value(&self.key, text);
        }
        Some(Cmd::Redraw)
    }

    fn edit<F>(&mut self, surface: &dyn Surface, f: F) -> Option<Cmd>
    where
        F: FnOnce(&mut FieldEditor) -> bool,
    {
        if !self.is_editing() {
            return None;
        }
        let Some(OpenEditor::Field(ed)) = self.editor.as_mut() else {
            return None;
        };
        if f(ed) {
            ed.autogrow(surface);
            let text = ed.text().to_string();
            self.coordinator.update_value(&self.key, text);
        }
        Some(Cmd::Redraw)
    }

    fn resync(&mut self, surface: &dyn Surface) -> Option<Cmd> {
        if !self.is_editing() {
            return None;
        }
        let anchor = surface.cell_rect(&self.context.address())?;
        let editor = self.editor.as_mut()?;
        if editor.positioner_mut().resync(anchor) {
            Some(Cmd::Redraw)
        } else {
            None
        }
    }

    /// Accept the text editor's value, close, then optionally move focus
    fn commit(&mut self, then: Option<Direction>) -> Option<Cmd> {
        let input = match &self.editor {
            Some(OpenEditor::Field(ed)) if self.is_editing() => ed.text().to_string(),
            _ => return None,
        };
        self.phase = Phase::Committing;

        let mut cmds = vec![Cmd::Redraw];
        if let Some(current) = self.committable_value() {
            let value = transform::commit(self.kind, &input, &current);
            let mut events: Vec<AfterEditEvent> = Vec::new();
            if save_value(&self.rows, &self.context, value, &mut events) {
                tracing::debug!("{} committed", self.key);
            } else {
                tracing::debug!("{} committed without change", self.key);
            }
            cmds.extend(events.into_iter().map(Cmd::after_edit));
        }
        self.close();

        match then {
            Some(Direction::Down) => {
                self.enter_guard.arm();
                cmds.push(Cmd::defer(self.key.clone(), CellMsg::FinishEnterChain));
            }
            Some(direction) => cmds.push(Cmd::navigate(self.context.position(), direction)),
            None => {}
        }
        Some(Cmd::batch(cmds))
    }

    fn cancel(&mut self) -> Option<Cmd> {
        if !self.is_editing() {
            return None;
        }
        self.phase = Phase::Cancelling;
        tracing::debug!("{} cancelled", self.key);
        self.close();
        Some(Cmd::Redraw)
    }

    /// Boolean cells write straight through; they never take the edit slot
    fn toggle(&mut self) -> Option<Cmd> {
        if self.kind != EditorKind::Toggle || !self.column.is_editable() {
            return None;
        }
        let next = boolean::toggled(&self.value());
        let mut events: Vec<AfterEditEvent> = Vec::new();
        match try_save_value(&self.rows, &self.context, next, &mut events) {
            Ok(_) => {
                let mut cmds = vec![Cmd::Redraw];
                cmds.extend(events.into_iter().map(Cmd::after_edit));
                Some(Cmd::batch(cmds))
            }
            Err(e) => {
                tracing::error!("Toggle of {} failed: {}", self.key, e);
                None
            }
        }
    }

    fn select_with<F>(&mut self, f: F) -> Option<Cmd>
    where
        F: FnOnce(&SelectEditor) -> SelectAction,
    {
        let action = match &self.editor {
            Some(OpenEditor::Select(dd)) if self.is_editing() => f(dd),
            _ => return None,
        };
        let SelectAction::Write { selections, close } = action else {
            return Some(Cmd::Redraw);
        };

        self.phase = Phase::Committing;
        let multi = matches!(self.kind, EditorKind::Select { multi: true });
        let mut cmds = vec![Cmd::Redraw];
        let mut applied = false;
        if self.committable_value().is_some() {
            let value = select_values::selection_value(&selections, multi);
            let mut events: Vec<AfterEditEvent> = Vec::new();
            applied = save_value(&self.rows, &self.context, value, &mut events);
            cmds.extend(events.into_iter().map(Cmd::after_edit));
        }

        if close {
            self.close();
            return Some(Cmd::batch(cmds));
        }
        self.phase = Phase::Editing;
        if applied {
            let snapshot = select_values::label(&selections, multi);
            if let Some(OpenEditor::Select(dd)) = self.editor.as_mut() {
                dd.mirror(selections);
            }
            self.coordinator.update_value(&self.key, snapshot);
        }
        Some(Cmd::batch(cmds))
    }

    // === Helpers ===

    fn row_id(&self) -> CellValue {
        self.rows
            .get(self.context.row_index, ID_COLUMN)
            .unwrap_or_default()
    }

    /// Stored value, unless the row went away or changed identity
    fn committable_value(&self) -> Option<CellValue> {
        let Some(current) = self
            .rows
            .get(self.context.row_index, &self.context.column_name)
        else {
            tracing::warn!("{} commit dropped: row is gone", self.key);
            return None;
        };
        let id = self.row_id();
        if id != self.open_row_id {
            tracing::warn!(
                "{} commit dropped: row id changed from {} to {}",
                self.key,
                self.open_row_id,
                id
            );
            return None;
        }
        Some(current)
    }

    /// Close the editor and release the slot; safe to call repeatedly
    fn close(&mut self) {
        self.coordinator.clear(Some(&self.key));
        self.reset();
    }

    fn reset(&mut self) {
        self.editor = None;
        self.pending_paste = None;
        self.open_row_id = CellValue::Null;
        self.phase = Phase::Idle;
    }
}

impl Drop for CellController {
    fn drop(&mut self) {
        if self.is_editing() {
            self.close();
        }
    }
}
