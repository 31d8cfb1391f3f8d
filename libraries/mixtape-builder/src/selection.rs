//! Multi-select state
//!
//! One instance tracks selected tracks, another selected library playlists.
//! Selections are ephemeral and never persisted.

use std::collections::HashSet;
use std::hash::Hash;

/// Set of selected ids
#[derive(Debug, Clone)]
pub struct Selection<Id> {
    ids: HashSet<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash> Selection<Id> {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present
    ///
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select exactly the ids of the current view, or clear if they already are
    ///
    /// When the selection equals `view_ids` the call clears it; otherwise the
    /// selection is replaced by `view_ids`. Ids outside the view are dropped
    /// either way.
    pub fn select_all<I>(&mut self, view_ids: I)
    where
        I: IntoIterator<Item = Id>,
    {
        let view: HashSet<Id> = view_ids.into_iter().collect();
        if self.ids == view {
            self.ids.clear();
        } else {
            self.ids = view;
        }
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Check if an id is selected
    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deselect the given ids
    pub fn remove_many<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Keep only ids matching the predicate
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Id) -> bool,
    {
        self.ids.retain(keep);
    }

    /// Copy of the selected ids
    pub fn snapshot(&self) -> HashSet<Id> {
        self.ids.clone()
    }

    /// Iterate over selected ids in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }
}
