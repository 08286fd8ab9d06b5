use thiserror::Error;

/// Represents errors that can occur while talking to the record source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// Error related to network connectivity or the HTTP request itself.
    #[error("Network request failed: {message}")]
    Request {
        message: String,
        /// Optional URL for additional context.
        url: Option<String>,
        is_timeout: bool,
    },

    /// The server returned a non-success status code.
    #[error("HTTP error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        url: Option<String>,
        /// Truncated body snippet for diagnostics.
        body_snippet: Option<String>,
    },

    /// Failed to deserialize the response body.
    #[error("Failed to deserialize response data: {message}")]
    Deserialization {
        message: String,
        body_snippet: Option<String>,
    },

    #[error("Invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        ClientError::Request {
            message: err.to_string(),
            url: err.url().map(|u| u.to_string()),
            is_timeout: err.is_timeout(),
        }
    }

    /// Returns a diagnostic string with contextual fields for log surfaces.
    pub fn diagnostic(&self) -> String {
        match self {
            ClientError::Request {
                message,
                url,
                is_timeout,
            } => {
                let mut msg = format!("Network request failed: {message}");
                if let Some(u) = url {
                    msg.push_str(&format!("\nurl: {u}"));
                }
                if *is_timeout {
                    msg.push_str("\ncontext: timed out");
                }
                msg
            }
            ClientError::Api {
                status,
                message,
                url,
                body_snippet,
            } => {
                let mut msg = format!("HTTP error (status {status}): {message}");
                if let Some(u) = url {
                    msg.push_str(&format!("\nurl: {u}"));
                }
                if let Some(snippet) = body_snippet {
                    msg.push_str("\nbody excerpt: ");
                    msg.push_str(snippet);
                }
                msg
            }
            ClientError::Deserialization {
                message,
                body_snippet,
            } => {
                let mut msg = format!("Failed to deserialize response data: {message}");
                if let Some(snippet) = body_snippet {
                    msg.push_str("\nbody excerpt: ");
                    msg.push_str(snippet);
                }
                msg
            }
            other => other.to_string(),
        }
    }
}

impl From<ClientError> for roster_error::Error {
    fn from(error: ClientError) -> Self {
        roster_error::Error::Client(error.diagnostic())
    }
}

/// Truncate large response bodies so error strings remain bounded.
pub(crate) fn truncate_for_error(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut head_end = max.saturating_sub(100);
    while !s.is_char_boundary(head_end) {
        head_end -= 1;
    }
    let mut tail_start = s.len().saturating_sub(100);
    while !s.is_char_boundary(tail_start) {
        tail_start += 1;
    }
    format!("{}…<snip>…{}", &s[..head_end], &s[tail_start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_mention_status() {
        let err = ClientError::Api {
            status: 500,
            message: "Internal Server Error".into(),
            url: Some("http://localhost/users?skip=0&limit=10".into()),
            body_snippet: Some("oops".into()),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error (status 500): Internal Server Error"
        );
        let diag = err.diagnostic();
        assert!(diag.contains("url: http://localhost/users"));
        assert!(diag.contains("body excerpt: oops"));
    }

    #[test]
    fn truncation_keeps_head_and_tail() {
        let body = "a".repeat(500) + &"z".repeat(500);
        let out = truncate_for_error(&body, 300);
        assert!(out.starts_with("aaa"));
        assert!(out.ends_with("zzz"));
        assert!(out.contains("<snip>"));
        assert!(out.len() < body.len());
    }

    #[test]
    fn converts_into_workspace_error() {
        let err: roster_error::Error = ClientError::Request {
            message: "connection refused".into(),
            url: None,
            is_timeout: false,
        }
        .into();
        assert!(matches!(err, roster_error::Error::Client(m) if m.contains("connection refused")));

        // Logged errors keep the request context the banner leaves out.
        let err: roster_error::Error = ClientError::Api {
            status: 503,
            message: "Service Unavailable".into(),
            url: Some("http://localhost/users/3".into()),
            body_snippet: Some("upstream down".into()),
        }
        .into();
        let text = err.to_string();
        assert!(text.contains("url: http://localhost/users/3"), "{text}");
        assert!(text.contains("body excerpt: upstream down"));
        assert_eq!(err.severity(), roster_error::Severity::Error);
    }
}
