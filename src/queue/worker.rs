use super::{QueueService, QueueView, RowStore};
use anyhow::Result;
use crossbeam_channel::{Receiver, bounded};
use log::debug;
use std::thread;

impl<Q, S> QueueView<Q, S>
where
    Q: QueueService + Send + 'static,
    S: RowStore + Send + 'static,
    S::Rows: Send + 'static,
{
    /// Builds the view on a worker thread.
    ///
    /// The finished view arrives on the returned channel once reconciliation
    /// is complete. Dropping the receiver discards it.
    pub fn spawn_build(queue: Q, store: S) -> Result<Receiver<QueueView<Q, S>>> {
        let (tx, rx) = bounded(1);

        thread::Builder::new()
            .name(String::from("queue-reconcile"))
            .spawn(move || {
                let view = QueueView::new(queue, store);
                if tx.send(view).is_err() {
                    debug!("Queue view finished after its receiver was dropped");
                }
            })?;

        Ok(rx)
    }
}
