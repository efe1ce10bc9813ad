//! Commit protocol
//!
//! Writes an accepted value into the shared row store and emits the
//! `afteredit` notification the grid engine listens for.

use serde::Serialize;

use crate::model::{CellContext, CellValue, RowStore, StoreError};

/// Structured change notification
///
/// `detail.value` is always the empty string; consumers read `detail.val`
/// for the committed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AfterEditEvent {
    #[serde(rename = "type")]
    pub name: &'static str,
    pub bubbles: bool,
    pub detail: AfterEditDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AfterEditDetail {
    #[serde(flatten)]
    pub context: CellContext,
    pub value: String,
    pub val: CellValue,
}

impl AfterEditEvent {
    pub const NAME: &'static str = "afteredit";

    pub fn new(context: CellContext, val: CellValue) -> Self {
        Self {
            name: Self::NAME,
            bubbles: true,
            detail: AfterEditDetail {
                context,
                value: String::new(),
                val,
            },
        }
    }

    pub fn context(&self) -> &CellContext {
        &self.detail.context
    }

    /// The committed value
    pub fn val(&self) -> &CellValue {
        &self.detail.val
    }
}

/// Where a commit dispatches its notification (the anchor element)
pub trait EventSink {
    fn dispatch(&mut self, event: AfterEditEvent);
}

impl EventSink for Vec<AfterEditEvent> {
    fn dispatch(&mut self, event: AfterEditEvent) {
        self.push(event);
    }
}

/// Write `value` at the context's address if it differs from the stored value
///
/// Returns `Ok(true)` when the row changed and one event was dispatched,
/// `Ok(false)` when the value was unchanged.
pub fn try_save_value(
    rows: &RowStore,
    ctx: &CellContext,
    value: CellValue,
    anchor: &mut dyn EventSink,
) -> Result<bool, StoreError> {
    let current = rows
        .get(ctx.row_index, &ctx.column_name)
        .ok_or_else(|| StoreError::MissingRow {
            index: ctx.row_index,
            len: rows.len(),
        })?;
    if current == value {
        return Ok(false);
    }
    rows.set(ctx.row_index, &ctx.column_name, value.clone())?;
    anchor.dispatch(AfterEditEvent::new(ctx.clone(), value));
    Ok(true)
}

/// Fail-closed commit: any problem reads as "not applied"
///
/// The boolean lets callers mirror local state only when the write
/// actually took effect.
pub fn save_value(
    rows: &RowStore,
    ctx: &CellContext,
    value: CellValue,
    anchor: &mut dyn EventSink,
) -> bool {
    if ctx.column_name.is_empty() {
        tracing::warn!("Commit skipped: no column name for row {}", ctx.row_index);
        return false;
    }
    match try_save_value(rows, ctx, value, anchor) {
        Ok(applied) => applied,
        Err(e) => {
            tracing::warn!(
                "Commit to {}:{}:{} not applied: {}",
                ctx.table_name,
                ctx.column_name,
                ctx.row_index,
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{row, CellAddress};

    fn ctx(row_index: usize) -> CellContext {
        CellContext::new(&CellAddress::new("t", "v", row_index), 0, false)
    }

    #[test]
    fn test_save_changed_value_dispatches_once() {
        let rows = RowStore::new(vec![row([("v", "a")])]);
        let mut events = Vec::new();
        assert!(save_value(&rows, &ctx(0), CellValue::text("A"), &mut events));
        assert_eq!(rows.get(0, "v"), Some(CellValue::text("A")));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].val(), &CellValue::text("A"));
        assert_eq!(events[0].detail.value, "");
    }

    #[test]
    fn test_save_unchanged_is_noop() {
        let rows = RowStore::new(vec![row([("v", "a")])]);
        let mut events = Vec::new();
        assert!(!save_value(&rows, &ctx(0), CellValue::text("a"), &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_save_missing_row_fails_closed() {
        let rows = RowStore::new(vec![]);
        let mut events = Vec::new();
        assert!(!save_value(&rows, &ctx(3), CellValue::text("x"), &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_save_missing_column_name_fails_closed() {
        let rows = RowStore::new(vec![row([("v", "a")])]);
        let mut context = ctx(0);
        context.column_name.clear();
        let mut events = Vec::new();
        assert!(!save_value(&rows, &context, CellValue::Null, &mut events));
    }

    #[test]
    fn test_try_save_busy_store() {
        let rows = RowStore::new(vec![row([("v", "a")])]);
        let _reader = rows.rows();
        let mut events = Vec::new();
        assert_eq!(
            try_save_value(&rows, &ctx(0), CellValue::Bool(true), &mut events),
            Err(StoreError::Busy)
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event = AfterEditEvent::new(ctx(1), CellValue::Number(2.5));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "afteredit");
        assert_eq!(json["bubbles"], true);
        assert_eq!(json["detail"]["rowIndex"], 1);
        assert_eq!(json["detail"]["value"], "");
        assert_eq!(json["detail"]["val"], 2.5);
    }
}
