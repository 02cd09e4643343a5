use super::{OrderBuffer, QueueService, RowCursor, RowIndex, RowStore, reconcile};
use crate::domain::{Column, Field, TrackId, TrackInfo, TrackRow};
use anyhow::{Error, Result, anyhow};
use log::debug;
use std::cell::Cell;

type FaultHook = Box<dyn Fn(&Error) + Send>;

/// Random-access view over the "now playing" queue.
///
/// Positions come from the queue service, row data from the row store. The
/// two are reconciled when the view is built and on [`QueueView::requery`].
/// Reads never fail: a row that can no longer be read yields an empty value
/// and flags the view for another reconciliation pass.
pub struct QueueView<Q: QueueService, S: RowStore> {
    queue: Q,
    store: S,

    order: OrderBuffer,
    index: Option<RowIndex>,
    rows: Option<S::Rows>,
    position: Option<usize>,

    stale: Cell<bool>,
    on_fault: Option<FaultHook>,
}

impl<Q: QueueService, S: RowStore> QueueView<Q, S> {
    pub fn new(queue: Q, store: S) -> Self {
        let mut view = QueueView {
            queue,
            store,
            order: OrderBuffer::default(),
            index: None,
            rows: None,
            position: None,
            stale: Cell::new(false),
            on_fault: None,
        };
        view.rebuild();
        view
    }

    /// Called with the underlying error whenever a read falls back to an
    /// empty value.
    pub fn set_fault_hook(&mut self, hook: impl Fn(&Error) + Send + 'static) {
        self.on_fault = Some(Box::new(hook));
    }

    pub fn size(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn order(&self) -> &[TrackId] {
        self.order.as_slice()
    }

    pub fn index(&self) -> Option<&RowIndex> {
        self.index.as_ref()
    }

    /// True after a read hit a fault and before the next requery.
    pub fn needs_requery(&self) -> bool {
        self.stale.get()
    }

    // ==============
    //   NAVIGATION
    // ==============

    pub fn move_to(&mut self, new_position: usize) -> bool {
        if self.position == Some(new_position) {
            return true;
        }

        let (Some(index), Some(rows)) = (&self.index, &mut self.rows) else {
            return false;
        };

        let Some(id) = self.order.get(new_position) else {
            return false;
        };

        let Some(ordinal) = index.ordinal_of(id) else {
            debug!("Track {id} at position {new_position} has no indexed row");
            return false;
        };

        if !rows.move_to(ordinal) {
            return false;
        }

        self.position = Some(new_position);
        true
    }

    pub fn move_to_first(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn move_to_last(&mut self) -> bool {
        match self.size() {
            0 => false,
            n => self.move_to(n - 1),
        }
    }

    pub fn move_to_next(&mut self) -> bool {
        match self.position {
            Some(p) => self.move_to(p + 1),
            None => self.move_to_first(),
        }
    }

    pub fn move_to_previous(&mut self) -> bool {
        match self.position {
            Some(p) if p > 0 => self.move_to(p - 1),
            _ => false,
        }
    }

    // ==========
    //   FIELDS
    // ==========

    pub fn read_field(&self, column: Column) -> Field<'_> {
        self.read(|row| row.field(column), Field::empty(column))
    }

    pub fn id(&self) -> TrackId {
        self.read(|row| row.get_id(), 0)
    }

    pub fn title(&self) -> &str {
        self.read(|row| row.get_title(), "")
    }

    pub fn artist(&self) -> &str {
        self.read(|row| row.get_artist(), "")
    }

    pub fn album(&self) -> &str {
        self.read(|row| row.get_album(), "")
    }

    fn read<'a, T>(&'a self, get: impl FnOnce(&'a TrackRow) -> T, empty: T) -> T {
        if self.position.is_none() {
            return empty;
        }

        match self.current_row() {
            Ok(row) => get(row),
            Err(e) => {
                self.report_fault(&e);
                empty
            }
        }
    }

    fn current_row(&self) -> Result<&TrackRow> {
        self.rows
            .as_ref()
            .ok_or_else(|| anyhow!("Queue view has no rows"))?
            .row()
    }

    fn report_fault(&self, e: &Error) {
        if !self.stale.replace(true) {
            debug!("Queue row read failed, requery scheduled: {e}");
        }
        if let Some(hook) = &self.on_fault {
            hook(e);
        }
    }

    // ===========
    //   EDITING
    // ===========

    /// Removes the entry at `position` from the queue service and from the
    /// local order. The row set is left untouched.
    pub fn remove_at(&mut self, position: usize) -> bool {
        if position >= self.order.len() {
            return false;
        }

        match self.queue.remove_range(position, position) {
            Ok(0) => return false,
            Ok(_) => (),
            Err(e) => {
                debug!("Queue service refused removal at {position}: {e}");
                return false;
            }
        }

        self.order.remove(position);

        // The slot may now hold a different track
        if let Some(previous) = self.position.take() {
            self.move_to(previous);
        }

        true
    }

    // =============
    //   LIFECYCLE
    // =============

    pub fn requery(&mut self) -> bool {
        self.rebuild();
        true
    }

    /// Runs a requery if a read fault asked for one.
    pub fn refresh_if_stale(&mut self) -> bool {
        match self.stale.get() {
            true => self.requery(),
            false => false,
        }
    }

    pub fn close(&mut self) {
        if let Some(mut rows) = self.rows.take() {
            if let Err(e) = rows.close() {
                debug!("Failed to release queue rows: {e}");
            }
        }
        self.index = None;
        self.position = None;
    }

    fn rebuild(&mut self) {
        let fresh = reconcile(&mut self.queue, &mut self.store);
        if fresh.faulted {
            debug!("Queue rows changed while indexing, requery scheduled");
        }

        let old_rows = std::mem::replace(&mut self.rows, fresh.rows);
        self.order = fresh.order;
        self.index = fresh.index;
        self.position = None;
        self.stale.set(fresh.faulted);

        if let Some(mut rows) = old_rows {
            if let Err(e) = rows.close() {
                debug!("Failed to release replaced queue rows: {e}");
            }
        }
    }
}

impl<Q: QueueService, S: RowStore> Drop for QueueView<Q, S> {
    fn drop(&mut self) {
        self.close();
    }
}
