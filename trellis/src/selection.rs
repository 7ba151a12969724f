//! Identity-keyed row selection.
//!
//! Selection tracks records by their [`Record::id`], not by value, so a row
//! stays selected when its other fields change. Entries are never purged when
//! the backing data changes; ids that no longer appear in the data stay
//! selected until the caller toggles or clears them.

use std::collections::HashMap;

use log::trace;

use crate::record::Record;

/// Set of selected records keyed by id.
#[derive(Debug, Clone)]
pub struct Selection<R: Record> {
    /// Selected records with their insertion sequence number.
    entries: HashMap<R::Id, (u64, R)>,
    next_seq: u64,
}

impl<R: Record> Default for Selection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Selection<R> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Number of selected records, stale entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a record with the same id is selected.
    pub fn is_selected(&self, record: &R) -> bool {
        self.entries.contains_key(&record.id())
    }

    /// Check whether an id is selected.
    pub fn contains_id(&self, id: &R::Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Add the record if absent, remove it if present.
    /// Returns true if the record is selected afterwards.
    pub fn toggle(&mut self, record: &R) -> bool {
        let id = record.id();
        if self.entries.remove(&id).is_some() {
            trace!("Deselected {:?}", id);
            false
        } else {
            trace!("Selected {:?}", id);
            self.insert(id, record.clone());
            true
        }
    }

    /// Select-all checkbox behavior over the visible `universe`.
    ///
    /// When the selection size already equals the universe size, everything
    /// is cleared. Otherwise the selection is replaced by exactly the
    /// universe, dropping entries outside it. An empty universe is a no-op.
    /// Returns true if the selection changed.
    pub fn toggle_all(&mut self, universe: &[R]) -> bool {
        if universe.is_empty() {
            return false;
        }
        if self.entries.len() == universe.len() {
            self.clear() > 0
        } else {
            self.replace_with(universe);
            true
        }
    }

    /// Replace the selection with exactly `records`.
    pub fn replace_with(&mut self, records: &[R]) {
        self.entries.clear();
        for record in records {
            self.insert(record.id(), record.clone());
        }
        trace!("Selection replaced with {} records", self.entries.len());
    }

    /// Remove everything. Returns how many records were deselected.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// True when every visible record is selected and there is at least one.
    pub fn all_selected(&self, universe_len: usize) -> bool {
        universe_len > 0 && self.entries.len() == universe_len
    }

    /// True when some, but not all, visible records are selected.
    pub fn indeterminate(&self, universe_len: usize) -> bool {
        !self.entries.is_empty() && self.entries.len() < universe_len
    }

    /// Selected records in the order they were added.
    pub fn records(&self) -> Vec<R> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, record)| record.clone()).collect()
    }

    fn insert(&mut self, id: R::Id, record: R) {
        self.entries.insert(id, (self.next_seq, record));
        self.next_seq += 1;
    }
}
