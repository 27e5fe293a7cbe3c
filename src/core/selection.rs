//! Active-term selection
//!
//! Keeps the single "active" term consistent with the current filtered
//! view, so the presentation layer never points at a record that is no
//! longer visible or no longer exists.

use crate::core::identity::TermId;
use crate::entities::Term;

/// State machine over one optional active-term reference
#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    current: Option<TermId>,
}

impl SelectionCoordinator {
    /// The currently selected term ID, if any
    pub fn current(&self) -> Option<TermId> {
        self.current
    }

    /// Reconcile the selection against a freshly recomputed filtered view.
    ///
    /// Keeps the selection when it is still visible; otherwise falls to
    /// the first visible element, or to no selection when the view is
    /// empty.
    pub fn reconcile(&mut self, filtered: &[Term]) {
        let still_visible = self
            .current
            .is_some_and(|id| filtered.iter().any(|t| t.id == id));
        if still_visible {
            return;
        }
        self.current = filtered.first().map(|t| t.id);
    }

    /// Explicit user selection of a visible term
    pub fn select(&mut self, id: TermId) {
        self.current = Some(id);
    }

    /// Clear the selection immediately if it points at the given ID.
    ///
    /// Used on delete, ahead of the next reconcile.
    pub fn deselect_if(&mut self, id: TermId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }
}
