//! HTTP access to the remote record collection.
//!
//! The collection is addressed as `{base_url}/{collection}` and supports two
//! calls: an offset page (`?skip=&limit=`) and a by-id lookup. The UI never
//! talks to [`RecordClient`] directly; it holds an `Arc<dyn RecordSource>` so
//! tests can substitute a scripted source.

pub mod client;
pub mod error;
pub mod source;

pub use client::{HttpConfig, RecordClient};
pub use error::ClientError;
pub use source::RecordSource;

/// Default upstream used when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default collection path segment.
pub const DEFAULT_COLLECTION: &str = "users";

/// The default number of seconds before a request is abandoned.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Tracing target for per-request log lines.
pub const HTTP_LOG_TARGET: &str = "roster_http";
