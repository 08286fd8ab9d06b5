use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use roster_core::{PageResponse, PageWindow, RecordId, User};
use url::Url;

use crate::error::{ClientError, truncate_for_error};
use crate::{DEFAULT_BASE_URL, DEFAULT_COLLECTION, HTTP_LOG_TARGET, REQUEST_TIMEOUT_SECS};

const BODY_SNIPPET_MAX: usize = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    base_url: Url,
    collection: String,
    timeout: Duration,
}

impl HttpConfig {
    pub fn new(
        base_url: &str,
        collection: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "url cannot be used as a base".into(),
            });
        }
        let collection = collection.into().trim_matches('/').to_string();
        if collection.is_empty() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "collection path is empty".into(),
            });
        }
        Ok(Self {
            base_url: parsed,
            collection,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for part in self.collection.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
        }
        url.set_query(None);
        url
    }

    /// `{base}/{collection}?skip=&limit=`
    pub fn page_url(&self, window: PageWindow) -> Url {
        let mut url = self.collection_url();
        url.query_pairs_mut()
            .append_pair("skip", &window.skip().to_string())
            .append_pair("limit", &window.limit().to_string());
        url
    }

    /// `{base}/{collection}/{id}`
    pub fn record_url(&self, id: RecordId) -> Url {
        let mut url = self.collection_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    /// The public upstream with the default collection and timeout.
    pub fn upstream() -> Result<Self, ClientError> {
        Self::new(
            DEFAULT_BASE_URL,
            DEFAULT_COLLECTION,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }
}

/// Plain HTTP GET client over the record collection.
#[derive(Debug, Clone)]
pub struct RecordClient {
    http: Client,
    cfg: HttpConfig,
}

impl RecordClient {
    pub fn new(cfg: HttpConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::from_reqwest)?;
        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.cfg
    }

    pub async fn fetch_page(&self, window: PageWindow) -> Result<PageResponse<User>, ClientError> {
        let url = self.cfg.page_url(window);
        let (status, body) = self.get(&url).await?;
        if !status.is_success() {
            return Err(api_error(status, &url, &body));
        }
        serde_json::from_str::<PageResponse<User>>(&body).map_err(|e| {
            ClientError::Deserialization {
                message: e.to_string(),
                body_snippet: Some(truncate_for_error(&body, BODY_SNIPPET_MAX)),
            }
        })
    }

    /// `Ok(None)` means the server has no such record (404, empty body or `null`).
    pub async fn fetch_record(&self, id: RecordId) -> Result<Option<User>, ClientError> {
        let url = self.cfg.record_url(id);
        let (status, body) = self.get(&url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(api_error(status, &url, &body));
        }
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }
        serde_json::from_str::<User>(trimmed)
            .map(Some)
            .map_err(|e| ClientError::Deserialization {
                message: e.to_string(),
                body_snippet: Some(truncate_for_error(trimmed, BODY_SNIPPET_MAX)),
            })
    }

    async fn get(&self, url: &Url) -> Result<(StatusCode, String), ClientError> {
        let started = Instant::now();
        let resp = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(target: HTTP_LOG_TARGET, %url, error = %e, "GET failed");
                ClientError::from_reqwest(e)
            })?;
        let status = resp.status();
        let body = resp.text().await.map_err(ClientError::from_reqwest)?;
        tracing::info!(
            target: HTTP_LOG_TARGET,
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "GET"
        );
        Ok((status, body))
    }
}

fn api_error(status: StatusCode, url: &Url, body: &str) -> ClientError {
    ClientError::Api {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
        url: Some(url.to_string()),
        body_snippet: (!body.is_empty()).then(|| truncate_for_error(body, BODY_SNIPPET_MAX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> RecordClient {
        let cfg = HttpConfig::new(&server.base_url(), "users", Duration::from_secs(5)).unwrap();
        RecordClient::new(cfg).unwrap()
    }

    fn user_json(id: u64) -> serde_json::Value {
        json!({ "id": id, "firstName": format!("First{id}"), "lastName": "Tester", "role": "user" })
    }

    #[test]
    fn page_url_carries_skip_and_limit() {
        let cfg =
            HttpConfig::new("https://dummyjson.com/", "/users/", Duration::from_secs(1)).unwrap();
        let url = cfg.page_url(PageWindow::new(3, 25).unwrap());
        assert_eq!(url.as_str(), "https://dummyjson.com/users?skip=75&limit=25");
        assert_eq!(
            cfg.record_url(RecordId(7)).as_str(),
            "https://dummyjson.com/users/7"
        );
    }

    #[test]
    fn default_upstream_parses() {
        let cfg = HttpConfig::upstream().unwrap();
        assert_eq!(cfg.collection(), DEFAULT_COLLECTION);
        assert_eq!(cfg.timeout(), Duration::from_secs(REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let cfg = HttpConfig::new("http://localhost:8080/api", "records", Duration::from_secs(1))
            .unwrap();
        let url = cfg.page_url(PageWindow::new(0, 10).unwrap());
        assert_eq!(url.as_str(), "http://localhost:8080/api/records?skip=0&limit=10");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let err = HttpConfig::new("mailto:someone@example.com", "users", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
        let err = HttpConfig::new("not a url", "users", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }

    #[tokio::test]
    async fn fetch_page_sends_offset_query() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/users")
                .query_param("skip", "10")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "users": [user_json(11), user_json(12)],
                "total": 12,
                "skip": 10,
                "limit": 5
            }));
        });

        let page = client_for(&server)
            .fetch_page(PageWindow::new(2, 5).unwrap())
            .await
            .expect("page");
        m.assert();
        assert_eq!(page.total, 12);
        assert_eq!(
            page.items.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![RecordId(11), RecordId(12)]
        );
    }

    #[tokio::test]
    async fn fetch_page_maps_server_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(500).body("boom");
        });

        let err = client_for(&server)
            .fetch_page(PageWindow::new(0, 10).unwrap())
            .await
            .expect_err("500 must fail");
        match err {
            ClientError::Api {
                status,
                body_snippet,
                ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(body_snippet.as_deref(), Some("boom"));
            }
            other => panic!("unexpected error variant {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_page_reports_malformed_bodies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).body("{ not json");
        });
        let err = client_for(&server)
            .fetch_page(PageWindow::new(0, 10).unwrap())
            .await
            .expect_err("malformed body");
        assert!(matches!(err, ClientError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        // Port 9 (discard) on localhost is not served by the test environment.
        let cfg = HttpConfig::new("http://127.0.0.1:9", "users", Duration::from_secs(2)).unwrap();
        let err = RecordClient::new(cfg)
            .unwrap()
            .fetch_page(PageWindow::new(0, 10).unwrap())
            .await
            .expect_err("nothing listens there");
        assert!(matches!(err, ClientError::Request { .. }));
    }

    #[tokio::test]
    async fn fetch_record_decodes_found_record() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/5");
            then.status(200).json_body(user_json(5));
        });
        let user = client_for(&server)
            .fetch_record(RecordId(5))
            .await
            .expect("ok")
            .expect("found");
        assert_eq!(user.first_name, "First5");
    }

    #[tokio::test]
    async fn fetch_record_treats_404_and_empty_bodies_as_missing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users/404");
            then.status(404)
                .json_body(json!({ "message": "User with id '404' not found" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/users/0");
            then.status(200).body("");
        });
        server.mock(|when, then| {
            when.method(GET).path("/users/1");
            then.status(200).body("null");
        });

        let client = client_for(&server);
        assert_eq!(client.fetch_record(RecordId(404)).await, Ok(None));
        assert_eq!(client.fetch_record(RecordId(0)).await, Ok(None));
        assert_eq!(client.fetch_record(RecordId(1)).await, Ok(None));
    }
}
