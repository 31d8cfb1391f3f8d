//! Soft-delete lifecycle
//!
//! Every track and saved playlist moves through
//! `Active -> Deleted(at) -> Active | Purged`. The store keeps the whole
//! collection in insertion order; the active and deleted views are computed
//! on demand and always partition it.

use chrono::{DateTime, Utc};
use mixtape_core::Recyclable;
use std::collections::HashSet;
use tracing::debug;

/// Collection of recyclable entities
#[derive(Debug, Clone)]
pub struct EntityStore<T: Recyclable> {
    items: Vec<T>,
}

impl<T: Recyclable> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Recyclable> EntityStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from loaded entities, keeping their order
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Every entity, active or deleted, in collection order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access to every entity
    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Number of entities in the collection
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entity regardless of state
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mutable lookup regardless of state
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Look up an entity that is not in the recycle bin
    pub fn get_active(&self, id: &T::Id) -> Option<&T> {
        self.get(id).filter(|item| !item.is_deleted())
    }

    /// Append an entity
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert an entity at the front (newest first)
    pub fn insert_front(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Active entities in collection order
    pub fn active(&self) -> Vec<&T> {
        self.items.iter().filter(|item| !item.is_deleted()).collect()
    }

    /// Deleted entities, most recently deleted first
    pub fn deleted(&self) -> Vec<&T> {
        let mut deleted: Vec<&T> = self.items.iter().filter(|item| item.is_deleted()).collect();
        deleted.sort_by(|a, b| b.deleted_at().cmp(&a.deleted_at()));
        deleted
    }

    /// Number of active entities
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_deleted()).count()
    }

    /// Number of deleted entities
    pub fn deleted_count(&self) -> usize {
        self.items.len() - self.active_count()
    }

    /// Move active entities to the recycle bin
    ///
    /// Returns the ids that were actually deleted by this call. Ids that are
    /// unknown or already deleted are left alone.
    pub fn soft_delete(&mut self, ids: &[T::Id], now: DateTime<Utc>) -> Vec<T::Id> {
        let wanted: HashSet<&T::Id> = ids.iter().collect();
        let mut deleted = Vec::new();

        for item in &mut self.items {
            if !item.is_deleted() && wanted.contains(item.id()) {
                item.set_deleted_at(Some(now));
                deleted.push(item.id().clone());
            }
        }

        deleted
    }

    /// Bring deleted entities back
    ///
    /// Returns the ids that were restored.
    pub fn restore(&mut self, ids: &[T::Id]) -> Vec<T::Id> {
        let wanted: HashSet<&T::Id> = ids.iter().collect();
        let mut restored = Vec::new();

        for item in &mut self.items {
            if item.is_deleted() && wanted.contains(item.id()) {
                item.set_deleted_at(None);
                restored.push(item.id().clone());
            }
        }

        restored
    }

    /// Permanently remove deleted entities
    ///
    /// Only entities in the recycle bin can be purged; active or unknown ids
    /// are ignored. Returns the ids that were removed.
    pub fn purge(&mut self, ids: &[T::Id]) -> Vec<T::Id> {
        let wanted: HashSet<&T::Id> = ids.iter().collect();
        let mut purged = Vec::new();

        self.items.retain(|item| {
            if item.is_deleted() && wanted.contains(item.id()) {
                purged.push(item.id().clone());
                false
            } else {
                true
            }
        });

        if purged.len() < wanted.len() {
            debug!(
                requested = wanted.len(),
                purged = purged.len(),
                "Ignoring purge of entities that are not in the recycle bin"
            );
        }

        purged
    }

    /// Purge every entity deleted before `now - retention`
    ///
    /// Returns the ids that were removed. A retention reaching past the
    /// representable date range expires nothing.
    pub fn sweep_expired(
        &mut self,
        retention: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Vec<T::Id> {
        let Some(cutoff) = now.checked_sub_signed(retention) else {
            debug!(%retention, "Retention exceeds date range, nothing expires");
            return Vec::new();
        };
        let mut purged = Vec::new();

        self.items.retain(|item| match item.deleted_at() {
            Some(at) if at < cutoff => {
                purged.push(item.id().clone());
                false
            }
            _ => true,
        });

        if !purged.is_empty() {
            debug!(count = purged.len(), %cutoff, "Swept expired entities");
        }

        purged
    }
}
