use roster_client::ClientError;
use roster_core::{LoadState, RecordId, User};
use roster_error::{ErrorPolicy, TracingPolicy};

/// What the detail view should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailStatus<'a> {
    Idle,
    Pending(RecordId),
    Found(&'a User),
    NotFound {
        id: RecordId,
        error: Option<&'a str>,
    },
}

/// Single-record lookup keyed by id.
#[derive(Debug, Default)]
pub struct DetailController {
    id: Option<RecordId>,
    loading: LoadState,
    record: Option<User>,
    error: Option<String>,
}

impl DetailController {
    /// Start showing `id`; the caller dispatches the fetch.
    pub fn open(&mut self, id: RecordId) -> RecordId {
        self.id = Some(id);
        self.loading = LoadState::Pending;
        self.record = None;
        self.error = None;
        id
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn current(&self) -> Option<RecordId> {
        self.id
    }

    /// Returns `false` when the completion belongs to an id that is no longer open.
    pub fn complete(&mut self, id: RecordId, result: Result<Option<User>, ClientError>) -> bool {
        if self.id != Some(id) {
            tracing::debug!(%id, open = ?self.id, "drop stale record completion");
            return false;
        }
        self.loading = LoadState::Finished;
        match result {
            Ok(record) => {
                if record.is_none() {
                    tracing::info!(%id, "record not found");
                }
                self.record = record;
            }
            Err(err) => {
                tracing::debug!(%id, "record fetch failed");
                self.record = None;
                self.error = Some(err.to_string());
                TracingPolicy.emit(&err.into());
            }
        }
        true
    }

    pub fn status(&self) -> DetailStatus<'_> {
        let Some(id) = self.id else {
            return DetailStatus::Idle;
        };
        match (self.loading, &self.record) {
            (LoadState::Pending, _) => DetailStatus::Pending(id),
            (LoadState::Finished, Some(user)) => DetailStatus::Found(user),
            (LoadState::Finished, None) => DetailStatus::NotFound {
                id,
                error: self.error.as_deref(),
            },
        }
    }
}
