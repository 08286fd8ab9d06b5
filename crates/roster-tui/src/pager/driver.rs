use std::collections::HashMap;
use std::sync::Arc;

use roster_client::RecordSource;
use roster_core::RecordId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{Pager, Ticket};
use crate::app::events::AppEvent;

/// Runs requests on the tokio runtime and reports back over `tx`.
///
/// Tasks never touch UI state. Aborting a superseded task only saves work;
/// the pager already ignores its completion.
#[derive(Debug)]
pub struct FetchDriver {
    source: Arc<dyn RecordSource>,
    tx: mpsc::UnboundedSender<AppEvent>,
    pages: HashMap<u64, JoinHandle<()>>,
    record: Option<JoinHandle<()>>,
}

impl FetchDriver {
    pub fn new(source: Arc<dyn RecordSource>, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            source,
            tx,
            pages: HashMap::new(),
            record: None,
        }
    }

    pub fn dispatch_page(&mut self, ticket: Ticket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = source.fetch_page(ticket.window()).await;
            if tx.send(AppEvent::PageLoaded { ticket, result }).is_err() {
                tracing::debug!(seq = ticket.seq(), "ui loop gone; dropping page result");
            }
        });
        self.pages.insert(ticket.seq(), handle);
    }

    /// Abort tasks for tickets the pager no longer waits on.
    pub fn prune(&mut self, pager: &Pager) {
        let live: Vec<u64> = pager.live_seqs().collect();
        self.pages.retain(|seq, handle| {
            if live.contains(seq) {
                return !handle.is_finished();
            }
            if !handle.is_finished() {
                tracing::trace!(seq, "abort superseded page request");
                handle.abort();
            }
            false
        });
    }

    pub fn dispatch_record(&mut self, id: RecordId) {
        if let Some(previous) = self.record.take() {
            previous.abort();
        }
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.record = Some(tokio::spawn(async move {
            let result = source.fetch_record(id).await;
            if tx.send(AppEvent::RecordLoaded { id, result }).is_err() {
                tracing::debug!(%id, "ui loop gone; dropping record result");
            }
        }));
    }

    pub fn in_flight(&self) -> usize {
        self.pages.values().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for FetchDriver {
    fn drop(&mut self) {
        for (_, handle) in self.pages.drain() {
            handle.abort();
        }
        if let Some(handle) = self.record.take() {
            handle.abort();
        }
    }
}
