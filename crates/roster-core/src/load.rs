use serde::{Deserialize, Serialize};

/// Lifecycle of a fetch as seen by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Pending,
    Finished,
}

impl LoadState {
    pub fn is_pending(self) -> bool {
        matches!(self, LoadState::Pending)
    }
}
