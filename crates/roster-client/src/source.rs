use std::fmt::Debug;

use async_trait::async_trait;
use roster_core::{PageResponse, PageWindow, RecordId, User};

use crate::{ClientError, RecordClient};

/// Anything that can serve pages and single records.
///
/// The UI holds this as `Arc<dyn RecordSource>`.
#[async_trait]
pub trait RecordSource: Send + Sync + Debug {
    async fn fetch_page(&self, window: PageWindow) -> Result<PageResponse<User>, ClientError>;

    /// `Ok(None)` when the record does not exist.
    async fn fetch_record(&self, id: RecordId) -> Result<Option<User>, ClientError>;
}

#[async_trait]
impl RecordSource for RecordClient {
    async fn fetch_page(&self, window: PageWindow) -> Result<PageResponse<User>, ClientError> {
        RecordClient::fetch_page(self, window).await
    }

    async fn fetch_record(&self, id: RecordId) -> Result<Option<User>, ClientError> {
        RecordClient::fetch_record(self, id).await
    }
}
