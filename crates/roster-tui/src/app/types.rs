/*!
Small cross-submodule types for the app module.

- input::keymap uses Mode to decide the active keymap.
- The view components read ViewMode to pick the table or the card grid.
*/

use serde::{Deserialize, Serialize};

use crate::pager::MergeMode;

/// Interaction mode for the TUI.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Navigation and single-key commands.
    #[default]
    Normal,
    /// Path prompt opened with `:`.
    Command,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Normal => write!(f, "Normal"),
            Mode::Command => write!(f, "Command"),
        }
    }
}

/// Presentation of the record collection.
#[derive(
    Default, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Paged table.
    #[default]
    List,
    /// Infinite card grid.
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }

    pub fn merge_mode(self) -> MergeMode {
        match self {
            ViewMode::List => MergeMode::Replace,
            ViewMode::Grid => MergeMode::Accumulate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::List => "List",
            ViewMode::Grid => "Grid",
        }
    }
}
