use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use roster_client::{ClientError, RecordSource};
use roster_core::{PageResponse, PageWindow, RecordId, User};

use crate::page_slice;

/// In-memory [`RecordSource`] with per-page failures and delays.
///
/// Pages are served from a fixed record list; `total` is its length.
/// Delays let tests make a later request complete before an earlier one.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    records: Vec<User>,
    page_failures: Mutex<HashMap<usize, ClientError>>,
    page_delays: HashMap<usize, Duration>,
    record_failure: Option<ClientError>,
    page_calls: Mutex<Vec<PageWindow>>,
    record_calls: Mutex<Vec<RecordId>>,
}

impl ScriptedSource {
    pub fn new(records: Vec<User>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Every request for `page_index` fails until [`ScriptedSource::heal_page`].
    pub fn fail_page(self, page_index: usize, error: ClientError) -> Self {
        lock(&self.page_failures).insert(page_index, error);
        self
    }

    pub fn heal_page(&self, page_index: usize) {
        lock(&self.page_failures).remove(&page_index);
    }

    pub fn delay_page(mut self, page_index: usize, delay: Duration) -> Self {
        self.page_delays.insert(page_index, delay);
        self
    }

    pub fn fail_records(mut self, error: ClientError) -> Self {
        self.record_failure = Some(error);
        self
    }

    /// Windows requested so far, in call order.
    pub fn page_calls(&self) -> Vec<PageWindow> {
        lock(&self.page_calls).clone()
    }

    pub fn record_calls(&self) -> Vec<RecordId> {
        lock(&self.record_calls).clone()
    }

    /// A canned transport failure.
    pub fn offline() -> ClientError {
        ClientError::Request {
            message: "connection refused".into(),
            url: None,
            is_timeout: false,
        }
    }

    /// A canned `500` response.
    pub fn server_error() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "Internal Server Error".into(),
            url: None,
            body_snippet: None,
        }
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch_page(&self, window: PageWindow) -> Result<PageResponse<User>, ClientError> {
        lock(&self.page_calls).push(window);
        if let Some(delay) = self.page_delays.get(&window.page_index()) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(err) = lock(&self.page_failures).get(&window.page_index()).cloned() {
            tracing::debug!(page = window.page_index(), %err, "scripted page failure");
            return Err(err);
        }
        let items = page_slice(&self.records, window.skip(), window.limit()).to_vec();
        Ok(PageResponse::new(items, self.records.len()))
    }

    async fn fetch_record(&self, id: RecordId) -> Result<Option<User>, ClientError> {
        lock(&self.record_calls).push(id);
        if let Some(err) = &self.record_failure {
            return Err(err.clone());
        }
        Ok(self.records.iter().find(|u| u.id == id).cloned())
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
