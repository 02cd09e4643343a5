use crate::{domain::TrackRow, queue::RowCursor};
use anyhow::{Result, anyhow, bail};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Rows fetched by one library query.
///
/// The handle remembers the library generation it was read at and refuses
/// to hand out rows once the library has been written to since.
pub struct LibraryRows {
    rows: Vec<TrackRow>,
    cursor: Option<usize>,
    snapshot: u64,
    generation: Arc<AtomicU64>,
    closed: bool,
}

impl LibraryRows {
    pub(super) fn new(rows: Vec<TrackRow>, generation: Arc<AtomicU64>) -> Self {
        LibraryRows {
            rows,
            cursor: None,
            snapshot: generation.load(Ordering::SeqCst),
            generation,
            closed: false,
        }
    }

    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.snapshot
    }
}

impl RowCursor for LibraryRows {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn move_to(&mut self, ordinal: usize) -> bool {
        if self.closed || ordinal >= self.rows.len() {
            return false;
        }
        self.cursor = Some(ordinal);
        true
    }

    fn row(&self) -> Result<&TrackRow> {
        if self.closed {
            bail!("Row set is closed");
        }
        if !self.is_current() {
            bail!("Row set was invalidated by a library change");
        }
        self.cursor
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| anyhow!("Row set is not positioned"))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.cursor = None;
        self.rows = Vec::new();
        Ok(())
    }
}
