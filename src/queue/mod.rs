mod order_buffer;
mod reconciler;
mod row_index;
mod view;
mod worker;

#[cfg(test)]
pub(crate) mod fakes;

pub use order_buffer::OrderBuffer;
pub use reconciler::{Reconciliation, reconcile};
pub use row_index::RowIndex;
pub use view::QueueView;

use crate::domain::{TrackId, TrackRow};
use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex};

/// Owner of the persisted play order.
pub trait QueueService {
    fn get_order(&mut self) -> Result<Vec<TrackId>>;

    /// Removes the inclusive position range `start..=end` from the live order
    /// and returns how many entries were actually removed.
    fn remove_range(&mut self, start: usize, end: usize) -> Result<usize>;
}

/// Result handle of a single row query.
pub trait RowCursor {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn move_to(&mut self, ordinal: usize) -> bool;

    /// Row under the cursor. Fails when the handle was closed or the backing
    /// data changed underneath it.
    fn row(&self) -> Result<&TrackRow>;

    fn close(&mut self) -> Result<()>;
}

pub trait RowStore {
    type Rows: RowCursor;

    /// Fetches the rows whose id is in `ids`, sorted ascending by id.
    /// Missing ids are skipped rather than reported.
    fn query_rows(&mut self, ids: &[TrackId]) -> Result<Self::Rows>;
}

impl<T: QueueService> QueueService for Arc<Mutex<T>> {
    fn get_order(&mut self) -> Result<Vec<TrackId>> {
        self.lock()
            .map_err(|_| anyhow!("Queue service lock poisoned"))?
            .get_order()
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<usize> {
        self.lock()
            .map_err(|_| anyhow!("Queue service lock poisoned"))?
            .remove_range(start, end)
    }
}

impl<T: RowStore> RowStore for Arc<Mutex<T>> {
    type Rows = T::Rows;

    fn query_rows(&mut self, ids: &[TrackId]) -> Result<Self::Rows> {
        self.lock()
            .map_err(|_| anyhow!("Row store lock poisoned"))?
            .query_rows(ids)
    }
}
