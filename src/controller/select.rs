//! Dropdown editor for single and multi select cells

use crate::overlay::OverlayPositioner;
use crate::transform::select;

/// What a dropdown action wants written
#[derive(Debug, Clone, PartialEq)]
pub enum SelectAction {
    /// Nothing to write
    Unchanged,
    /// Write these selections; close afterwards when `close` is set
    Write { selections: Vec<String>, close: bool },
}

/// An open dropdown
///
/// Keeps a local mirror of the selections so a multi-select can stay open
/// across several writes without waiting for the grid to re-render.
#[derive(Debug, Clone)]
pub struct SelectEditor {
    multi: bool,
    selections: Vec<String>,
    positioner: OverlayPositioner,
}

impl SelectEditor {
    pub fn new(multi: bool, selections: Vec<String>, positioner: OverlayPositioner) -> Self {
        Self {
            multi,
            selections,
            positioner,
        }
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn selections(&self) -> &[String] {
        &self.selections
    }

    pub fn positioner(&self) -> &OverlayPositioner {
        &self.positioner
    }

    pub fn positioner_mut(&mut self) -> &mut OverlayPositioner {
        &mut self.positioner
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selections.iter().any(|s| s == option)
    }

    /// Pick an option
    ///
    /// Single select replaces the selection and closes. Multi select appends
    /// and stays open; re-picking a selected option changes nothing.
    pub fn pick(&self, option: &str) -> SelectAction {
        if !self.multi {
            return SelectAction::Write {
                selections: vec![option.to_string()],
                close: true,
            };
        }
        if self.is_selected(option) {
            return SelectAction::Unchanged;
        }
        let mut next = self.selections.clone();
        next.push(option.to_string());
        SelectAction::Write {
            selections: next,
            close: false,
        }
    }

    /// Remove an option from the selection
    pub fn unpick(&self, option: &str) -> SelectAction {
        if !self.is_selected(option) {
            return SelectAction::Unchanged;
        }
        let next: Vec<String> = self
            .selections
            .iter()
            .filter(|s| s.as_str() != option)
            .cloned()
            .collect();
        SelectAction::Write {
            selections: next,
            close: !self.multi,
        }
    }

    /// The "Clear" action: empty selection, then close
    pub fn clear(&self) -> SelectAction {
        SelectAction::Write {
            selections: Vec::new(),
            close: true,
        }
    }

    /// Adopt selections after a write took effect
    pub fn mirror(&mut self, selections: Vec<String>) {
        self.selections = selections;
    }

    /// Label for the current selections
    pub fn label(&self) -> String {
        select::label(&self.selections, self.multi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::overlay::{OverlayMetrics, Placement};

    fn dropdown(multi: bool, selected: &[&str]) -> SelectEditor {
        let positioner = OverlayPositioner::new(
            Placement::Below,
            Rect::new(0.0, 0.0, 200.0, 36.0),
            OverlayMetrics::default(),
        );
        SelectEditor::new(
            multi,
            selected.iter().map(|s| s.to_string()).collect(),
            positioner,
        )
    }

    #[test]
    fn test_multi_pick_appends_and_stays_open() {
        let dd = dropdown(true, &["a"]);
        assert_eq!(
            dd.pick("b"),
            SelectAction::Write {
                selections: vec!["a".to_string(), "b".to_string()],
                close: false
            }
        );
    }

    #[test]
    fn test_multi_repick_is_noop() {
        let dd = dropdown(true, &["a", "b"]);
        assert_eq!(dd.pick("a"), SelectAction::Unchanged);
    }

    #[test]
    fn test_single_pick_closes() {
        let dd = dropdown(false, &["a"]);
        assert_eq!(
            dd.pick("a"),
            SelectAction::Write {
                selections: vec!["a".to_string()],
                close: true
            }
        );
    }

    #[test]
    fn test_unpick() {
        let dd = dropdown(true, &["a", "b"]);
        assert_eq!(
            dd.unpick("a"),
            SelectAction::Write {
                selections: vec!["b".to_string()],
                close: false
            }
        );
        assert_eq!(dd.unpick("zzz"), SelectAction::Unchanged);
    }

    #[test]
    fn test_label_and_mirror() {
        let mut dd = dropdown(true, &[]);
        assert_eq!(dd.label(), "");
        dd.mirror(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(dd.label(), "x, y");
    }
}
