//! A policy for classifying and emitting errors.
//!
//! With the `tracing` feature, [`TracingPolicy`] logs each error under the
//! `roster::error` target at a level matching its [`Severity`].
use super::{Error, Severity};

pub trait ErrorPolicy: Send + Sync {
    /// Classify the error's severity
    fn classify(&self, error: &Error) -> Severity;

    /// Emit the error according to the policy (e.g., log, send to UI, etc.)
    fn emit(&self, error: &Error);
}

/// A policy that uses the error's default severity and emits via tracing
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        use tracing::{Level, event};

        match error.severity() {
            Severity::Warning => event!(target: "roster::error", Level::WARN, error = %error),
            Severity::Error | Severity::Fatal => {
                event!(target: "roster::error", Level::ERROR, error = %error)
            }
        }
    }
}
