pub mod policy;
pub mod result_ext;
pub mod severity;

// public exports
pub use policy::ErrorPolicy;
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use result_ext::ResultExt;
pub use severity::Severity;

use std::path::PathBuf;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Configuration could not be read or deserialized.
    #[error("Config error: {message}")]
    Config { message: String },

    #[error("I/O failure on {path:?}: {operation}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A request to the remote record source failed.
    #[error("Client error: {0}")]
    Client(String),

    #[error("Unexpected state: {0}")]
    Internal(String),
}

impl Error {
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            operation,
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Default classification used by the bundled policies.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Config { .. } => Severity::Warning,
            Error::Io { .. } | Error::Client(_) => Severity::Error,
            Error::Internal(_) => Severity::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_render_path_and_operation() {
        let err = Error::io(
            "write preferences",
            "/tmp/roster/preferences.toml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("write preferences"));
        assert!(text.contains("preferences.toml"));
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn config_errors_are_warnings() {
        let err = Error::Config {
            message: "missing field".into(),
        };
        assert_eq!(err.severity(), Severity::Warning);
    }
}
