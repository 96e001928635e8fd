//! Query cache.
//!
//! Holds the last server answer for each query the console issued. Entries
//! are never patched locally: a mutation invalidates the affected queries
//! and the next load refetches them, while the stale answer stays readable
//! until the fresh one arrives.

use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

use crate::models::{Equipment, EquipmentType, ListParams, MaintenanceLog, Page};

/// Group of cached queries a mutation invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    /// Every equipment page, whatever its parameters
    EquipmentLists,
    EquipmentTypes,
    /// History of one equipment
    MaintenanceHistory(i64),
}

/// A cached answer and whether it should be refetched
#[derive(Debug)]
pub struct Cached<'a, V> {
    pub value: &'a V,
    pub stale: bool,
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    fetched_at: Instant,
    invalidated: bool,
}

#[derive(Debug)]
struct Slots<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> Slots<K, V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn get(&self, key: &K, stale_after: Duration) -> Option<Cached<'_, V>> {
        self.entries.get(key).map(|entry| Cached {
            value: &entry.value,
            stale: entry.invalidated || entry.fetched_at.elapsed() >= stale_after,
        })
    }

    /// Insert `value`, dropping entries fetched `gc_after` ago or earlier
    fn store(&mut self, key: K, value: V, gc_after: Duration) {
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() < gc_after);
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
                invalidated: false,
            },
        );
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn invalidate(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
    }
}

#[derive(Debug)]
pub struct QueryCache {
    stale_after: Duration,
    gc_after: Duration,
    lists: Slots<ListParams, Page<Equipment>>,
    types: Slots<(), Vec<EquipmentType>>,
    history: Slots<i64, Vec<MaintenanceLog>>,
}

impl QueryCache {
    /// Entries older than `stale_after` are refetched on next load; those
    /// older than `gc_after` are dropped the next time their family stores
    pub fn new(stale_after: Duration, gc_after: Duration) -> Self {
        Self {
            stale_after,
            gc_after,
            lists: Slots::new(),
            types: Slots::new(),
            history: Slots::new(),
        }
    }

    pub fn equipment_page(&self, params: &ListParams) -> Option<Cached<'_, Page<Equipment>>> {
        self.lists.get(params, self.stale_after)
    }

    pub fn store_equipment_page(&mut self, params: ListParams, page: Page<Equipment>) {
        self.lists.store(params, page, self.gc_after);
    }

    pub fn equipment_types(&self) -> Option<Cached<'_, Vec<EquipmentType>>> {
        self.types.get(&(), self.stale_after)
    }

    pub fn store_equipment_types(&mut self, types: Vec<EquipmentType>) {
        self.types.store((), types, self.gc_after);
    }

    pub fn maintenance_history(&self, equipment_id: i64) -> Option<Cached<'_, Vec<MaintenanceLog>>> {
        self.history.get(&equipment_id, self.stale_after)
    }

    pub fn store_maintenance_history(&mut self, equipment_id: i64, history: Vec<MaintenanceLog>) {
        self.history.store(equipment_id, history, self.gc_after);
    }

    /// Number of cached equipment pages
    pub fn cached_pages(&self) -> usize {
        self.lists.len()
    }

    pub fn invalidate(&mut self, scope: QueryScope) {
        tracing::debug!(?scope, "Invalidating cached queries");
        match scope {
            QueryScope::EquipmentLists => self.lists.invalidate_all(),
            QueryScope::EquipmentTypes => self.types.invalidate_all(),
            QueryScope::MaintenanceHistory(id) => self.history.invalidate(&id),
        }
    }
}
