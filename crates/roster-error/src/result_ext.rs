use super::{ErrorPolicy, Result, Severity};

/// Extension trait for `Result` enabling policy-driven emission without
/// contaminating core control-flow with side-effects.
///
/// ```rust,ignore
/// use roster_error::{Error, ResultExt, TracingPolicy};
///
/// let r: roster_error::Result<()> = Err(Error::Client("connection refused".into()));
/// let r = r.emit_error(&TracingPolicy); // still Err for the caller to handle
/// ```
pub trait ResultExt<T> {
    /// If the result is an error, emit it as an error using the policy
    fn emit_error(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_error(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            if policy.classify(e) >= Severity::Error {
                policy.emit(e);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl ErrorPolicy for Recording {
        fn classify(&self, error: &Error) -> Severity {
            error.severity()
        }

        fn emit(&self, error: &Error) {
            self.0.lock().unwrap().push(error.to_string());
        }
    }

    #[test]
    fn emit_error_skips_warnings() {
        let policy = Recording::default();
        let warn: Result<()> = Err(Error::Config {
            message: "page_size: invalid type".into(),
        });
        let err: Result<()> = Err(Error::Client("boom".into()));

        let _ = warn.emit_error(&policy);
        let _ = err.emit_error(&policy);

        let seen = policy.0.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("boom"));
    }

    #[test]
    fn ok_results_pass_through_untouched() {
        let policy = Recording::default();
        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.emit_error(&policy).unwrap(), 7);
        assert!(policy.0.lock().unwrap().is_empty());
    }
}
