use super::RowCursor;
use crate::domain::TrackId;
use anyhow::{Result, anyhow};

/// Ids of a row query result, in result order (ascending).
///
/// The position of an id in the index is the ordinal of its row in the
/// query result it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndex {
    ids: Vec<TrackId>,
}

impl RowIndex {
    pub fn from_sorted(ids: Vec<TrackId>) -> Self {
        debug_assert!(ids.is_sorted(), "row index must be sorted");
        RowIndex { ids }
    }

    /// Walks every row of `rows` once and records its id.
    /// The query already sorted the rows, so no sort happens here.
    pub fn build<C: RowCursor>(rows: &mut C) -> Result<Self> {
        let mut ids = Vec::with_capacity(rows.len());

        for ordinal in 0..rows.len() {
            if !rows.move_to(ordinal) {
                return Err(anyhow!("Row {ordinal} vanished while indexing"));
            }
            ids.push(rows.row()?.id);
        }

        if !ids.is_sorted() {
            return Err(anyhow!("Row query returned ids out of order"));
        }

        Ok(RowIndex { ids })
    }

    pub fn ordinal_of(&self, id: TrackId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.ordinal_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }
}
