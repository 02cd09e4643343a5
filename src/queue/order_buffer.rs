use crate::domain::TrackId;
use nohash_hasher::IntSet;

/// Local copy of the play order. Index is the play position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBuffer {
    entries: Vec<TrackId>,
}

impl OrderBuffer {
    pub fn new(entries: Vec<TrackId>) -> Self {
        OrderBuffer { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<TrackId> {
        self.entries.get(position).copied()
    }

    pub fn as_slice(&self) -> &[TrackId] {
        &self.entries
    }

    /// Every id in the buffer once, ascending.
    pub fn distinct_ids(&self) -> Vec<TrackId> {
        let unique: IntSet<TrackId> = self.entries.iter().copied().collect();
        let mut ids = unique.into_iter().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    /// Splices out `position`, shifting later entries left by one.
    pub fn remove(&mut self, position: usize) -> Option<TrackId> {
        if position < self.entries.len() {
            Some(self.entries.remove(position))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear()
    }
}
