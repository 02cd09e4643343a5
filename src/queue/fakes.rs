use super::{QueueService, RowCursor, RowStore};
use crate::domain::{TrackId, TrackRow};
use anyhow::{Result, anyhow, bail};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

pub fn row(id: TrackId) -> TrackRow {
    TrackRow::new(id, format!("Track {id}"), format!("Artist {id}"), format!("Album {id}"))
}

#[derive(Default)]
pub struct FakeQueue {
    pub order: Vec<TrackId>,
    pub removals: Vec<(usize, usize)>,
    pub reads: usize,
    pub unavailable: bool,
    pub refuse_removal: bool,
    /// Served instead of `order` on every read after the first, as if the
    /// queue was edited elsewhere in between.
    pub reread: Option<Vec<TrackId>>,
}

impl FakeQueue {
    pub fn with_order(order: &[TrackId]) -> Self {
        FakeQueue {
            order: order.to_vec(),
            ..Default::default()
        }
    }
}

impl QueueService for FakeQueue {
    fn get_order(&mut self) -> Result<Vec<TrackId>> {
        self.reads += 1;
        if self.unavailable {
            bail!("queue service unavailable");
        }
        match &self.reread {
            Some(order) if self.reads > 1 => Ok(order.clone()),
            _ => Ok(self.order.clone()),
        }
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<usize> {
        if self.unavailable {
            bail!("queue service unavailable");
        }
        self.removals.push((start, end));

        if self.refuse_removal || start > end || start >= self.order.len() {
            return Ok(0);
        }
        let end = end.min(self.order.len() - 1);
        Ok(self.order.drain(start..=end).count())
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub library: Vec<TrackRow>,
    pub queries: usize,
    pub unavailable: bool,
    pub fault: Arc<AtomicBool>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeStore {
    pub fn with_ids(ids: &[TrackId]) -> Self {
        FakeStore {
            library: ids.iter().copied().map(row).collect(),
            ..Default::default()
        }
    }

    pub fn forget(&mut self, id: TrackId) {
        self.library.retain(|r| r.id != id);
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl RowStore for FakeStore {
    type Rows = FakeRows;

    fn query_rows(&mut self, ids: &[TrackId]) -> Result<FakeRows> {
        self.queries += 1;
        if self.unavailable {
            bail!("row store unavailable");
        }

        let mut rows = self
            .library
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by_key(|r| r.id);

        Ok(FakeRows {
            rows,
            cursor: None,
            closed: false,
            fault: Arc::clone(&self.fault),
            closes: Arc::clone(&self.closes),
        })
    }
}

pub struct FakeRows {
    rows: Vec<TrackRow>,
    cursor: Option<usize>,
    closed: bool,
    pub fault: Arc<AtomicBool>,
    closes: Arc<AtomicUsize>,
}

impl FakeRows {
    /// Rows in exactly the given order, unsorted.
    pub fn from_ids(ids: &[TrackId]) -> Self {
        FakeRows {
            rows: ids.iter().copied().map(row).collect(),
            cursor: None,
            closed: false,
            fault: Arc::default(),
            closes: Arc::default(),
        }
    }
}

impl RowCursor for FakeRows {
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
        if self.fault.load(Ordering::SeqCst) {
            bail!("rows invalidated");
        }
        if self.closed {
            bail!("rows closed");
        }
        self.cursor
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| anyhow!("rows not positioned"))
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
