//! List-backed selector shared by the assistant and voice pickers.
//!
//! DESIGN
//! ======
//! The selector owns the fetched list (server order preserved), the current
//! selection, and whether its overlay is open. Default selection is an
//! explicit step: `load` runs `ensure_default_selected` and hands back the
//! newly chosen item so the caller notifies its parent once per load.

use crate::manager::{Assistant, Voice};

/// Anything with a stable string identity.
pub trait Selectable: Clone {
    fn id(&self) -> &str;
}

impl Selectable for Assistant {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Selectable for Voice {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Pick the item to auto-select, if any.
///
/// Returns the first item when nothing is selected and the list is non-empty.
#[must_use]
pub fn ensure_default_selected<'a, T>(selected: Option<&T>, items: &'a [T]) -> Option<&'a T> {
    if selected.is_some() {
        return None;
    }
    items.first()
}

#[derive(Debug, Clone)]
pub struct ListSelector<T> {
    items: Vec<T>,
    selected: Option<T>,
    open: bool,
}

impl<T: Selectable> ListSelector<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new(), selected: None, open: false }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Replace the list and apply the default-selection policy.
    ///
    /// Returns the item that was auto-selected, if this load selected one.
    pub fn load(&mut self, items: Vec<T>) -> Option<&T> {
        self.items = items;
        self.apply_default()
    }

    /// Empty the list after a failed fetch. The current selection is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop the current selection, then re-run the default policy.
    pub fn clear_selection(&mut self) -> Option<&T> {
        self.selected = None;
        self.apply_default()
    }

    /// Select the item with `id` and close the overlay.
    pub fn select(&mut self, id: &str) -> Option<&T> {
        let item = self.items.iter().find(|item| item.id() == id)?.clone();
        self.open = false;
        self.selected = Some(item);
        self.selected.as_ref()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    fn apply_default(&mut self) -> Option<&T> {
        let first = ensure_default_selected(self.selected.as_ref(), &self.items)?.clone();
        self.selected = Some(first);
        self.selected.as_ref()
    }
}

impl<T: Selectable> Default for ListSelector<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
