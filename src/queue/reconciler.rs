use super::{OrderBuffer, QueueService, RowCursor, RowIndex, RowStore};
use log::{debug, info, warn};

/// A consistent snapshot of the queue against the library.
pub struct Reconciliation<R> {
    pub order: OrderBuffer,
    pub index: Option<RowIndex>,
    pub rows: Option<R>,
    /// Queue entries removed because their row no longer exists.
    pub pruned: usize,
    /// The row set went bad while it was being indexed. The result is empty
    /// and should be rebuilt on the next pass.
    pub faulted: bool,
}

impl<R: RowCursor> Reconciliation<R> {
    fn empty() -> Self {
        Reconciliation {
            order: OrderBuffer::default(),
            index: None,
            rows: None,
            pruned: 0,
            faulted: false,
        }
    }

    fn release_rows(&mut self) {
        if let Some(mut rows) = self.rows.take() {
            if let Err(e) = rows.close() {
                debug!("Failed to release row set: {e}");
            }
        }
    }
}

/// Rebuilds the row index for the current play order and prunes queue
/// entries whose row is gone.
///
/// Runs exactly one corrective pass: after pruning, the order is re-read once
/// and taken as is.
pub fn reconcile<Q, S>(queue: &mut Q, store: &mut S) -> Reconciliation<S::Rows>
where
    Q: QueueService,
    S: RowStore,
{
    let order = match queue.get_order() {
        Ok(order) => OrderBuffer::new(order),
        Err(e) => {
            warn!("Could not read play order: {e}");
            return Reconciliation::empty();
        }
    };

    if order.is_empty() {
        return Reconciliation::empty();
    }

    let mut rows = match store.query_rows(&order.distinct_ids()) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Row query for {} queued tracks failed: {e}", order.len());
            return Reconciliation::empty();
        }
    };

    let index = match RowIndex::build(&mut rows) {
        Ok(index) => index,
        Err(e) => {
            warn!("Could not index queued rows: {e}");
            if let Err(e) = rows.close() {
                debug!("Failed to release row set: {e}");
            }
            return Reconciliation {
                faulted: true,
                ..Reconciliation::empty()
            };
        }
    };

    let mut result = Reconciliation {
        order,
        index: Some(index),
        rows: Some(rows),
        pruned: 0,
        faulted: false,
    };

    // Back to front, so removing a position never shifts one still to visit
    let mut removed = 0;
    for position in (0..result.order.len()).rev() {
        let Some(id) = result.order.get(position) else {
            continue;
        };
        if result.index.as_ref().is_some_and(|index| index.contains(id)) {
            continue;
        }
        match queue.remove_range(position, position) {
            Ok(count) => removed += count,
            Err(e) => warn!("Could not drop missing track {id} at position {position}: {e}"),
        }
    }

    if removed > 0 {
        info!("Pruned {removed} queue entries with no library row");
        result.pruned = removed;

        match queue.get_order() {
            Ok(order) => result.order = OrderBuffer::new(order),
            Err(e) => {
                warn!("Could not re-read play order after pruning: {e}");
                result.order.clear();
            }
        }

        if result.order.is_empty() {
            result.index = None;
            result.release_rows();
        }
    }

    debug!(
        "Queue reconciled: {} entries, {} indexed rows",
        result.order.len(),
        result.index.as_ref().map_or(0, RowIndex::len)
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::fakes::{FakeQueue, FakeStore};
    use std::sync::atomic::Ordering;

    #[test]
    fn empty_queue_skips_row_query() {
        let mut queue = FakeQueue::default();
        let mut store = FakeStore::with_ids(&[1, 2]);

        let result = reconcile(&mut queue, &mut store);

        assert!(result.order.is_empty());
        assert!(result.index.is_none());
        assert!(result.rows.is_none());
        assert_eq!(store.queries, 0);
    }

    #[test]
    fn missing_middle_track_is_pruned() {
        let (a, b, c) = (10, 20, 30);
        let mut queue = FakeQueue::with_order(&[a, b, c]);
        let mut store = FakeStore::with_ids(&[a, c]);

        let result = reconcile(&mut queue, &mut store);

        assert_eq!(result.order.as_slice(), &[a, c]);
        assert_eq!(queue.removals, vec![(1, 1)]);
        assert_eq!(result.index.as_ref().unwrap().ids(), &[a, c]);
        assert_eq!(result.pruned, 1);
        assert_eq!(queue.reads, 2);
    }

    #[test]
    fn stale_entries_are_removed_back_to_front() {
        let mut queue = FakeQueue::with_order(&[5, 1, 5, 2, 3, 1]);
        let mut store = FakeStore::with_ids(&[2, 3]);

        let result = reconcile(&mut queue, &mut store);

        assert_eq!(queue.removals, vec![(5, 5), (2, 2), (1, 1), (0, 0)]);
        assert_eq!(result.order.as_slice(), &[2, 3]);
        assert_eq!(result.pruned, 4);
    }

    #[test]
    fn no_stale_survivors() {
        let mut queue = FakeQueue::with_order(&[4, 8, 15, 16, 23, 42, 8, 4]);
        let mut store = FakeStore::with_ids(&[4, 15, 23, 99]);

        let result = reconcile(&mut queue, &mut store);
        let index = result.index.unwrap();

        assert!(!result.order.is_empty());
        assert!(result.order.as_slice().iter().all(|id| index.contains(*id)));
    }

    #[test]
    fn consistent_queue_is_read_once() {
        let mut queue = FakeQueue::with_order(&[3, 1, 3]);
        let mut store = FakeStore::with_ids(&[1, 3]);

        let result = reconcile(&mut queue, &mut store);

        assert_eq!(queue.reads, 1);
        assert!(queue.removals.is_empty());
        assert_eq!(result.order.as_slice(), &[3, 1, 3]);
        assert_eq!(result.pruned, 0);
    }

    #[test]
    fn all_stale_ends_empty_and_releases_rows() {
        let mut queue = FakeQueue::with_order(&[1, 2]);
        let mut store = FakeStore::with_ids(&[7]);

        let result = reconcile(&mut queue, &mut store);

        assert!(result.order.is_empty());
        assert!(result.index.is_none());
        assert!(result.rows.is_none());
        assert_eq!(store.closes(), 1);
    }

    #[test]
    fn failed_row_query_means_empty() {
        let mut queue = FakeQueue::with_order(&[1, 2]);
        let mut store = FakeStore::with_ids(&[1, 2]);
        store.unavailable = true;

        let result = reconcile(&mut queue, &mut store);

        assert!(result.order.is_empty());
        assert!(result.index.is_none());
        assert!(queue.removals.is_empty());
        assert!(!result.faulted);
    }

    #[test]
    fn rows_going_bad_while_indexing_is_flagged() {
        let mut queue = FakeQueue::with_order(&[1, 2]);
        let mut store = FakeStore::with_ids(&[1, 2]);
        store.fault.store(true, Ordering::SeqCst);

        let result = reconcile(&mut queue, &mut store);

        assert!(result.faulted);
        assert!(result.order.is_empty());
        assert!(result.rows.is_none());
        assert!(queue.removals.is_empty());
        assert_eq!(store.closes(), 1);
    }

    #[test]
    fn unavailable_queue_means_empty() {
        let mut queue = FakeQueue::with_order(&[1]);
        queue.unavailable = true;
        let mut store = FakeStore::with_ids(&[1]);

        let result = reconcile(&mut queue, &mut store);

        assert!(result.order.is_empty());
        assert_eq!(store.queries, 0);
    }
}
