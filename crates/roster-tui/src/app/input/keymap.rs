/*!
Key mapping for the TUI.

This module translates low-level KeyEvent inputs into high-level Actions that
the App can handle. This keeps `App::on_key_event` simple and makes
keybindings testable.

Intended usage:
- Call `to_action(mode, key)` from the App input loop.
- Match on `Action` in a single handler.
*/

use crate::app::types::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // App lifecycle
    Quit,

    // Prompt
    OpenPrompt,
    InsertChar(char),
    DeleteChar,
    SubmitPrompt,
    CancelPrompt,

    // Shell
    ToggleSidebar,
    ToggleView,
    ToggleTheme,
    Back,

    // Records
    Retry,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ScrollPageUp,
    ScrollPageDown,
    PrevPage,
    NextPage,
    CyclePageSize,
    Activate,
}

/// Map a KeyEvent to an Action based on the current Mode.
/// Returns None for unmapped keys.
pub fn to_action(mode: Mode, key: KeyEvent) -> Option<Action> {
    // Global bindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        Mode::Command => match (key.modifiers, key.code) {
            (m, KeyCode::Esc) if m.is_empty() => Some(Action::CancelPrompt),
            (_, KeyCode::Enter) => Some(Action::SubmitPrompt),
            (_, KeyCode::Backspace) => Some(Action::DeleteChar),
            (m, KeyCode::Char(c)) if m.is_empty() || m == KeyModifiers::SHIFT => {
                Some(Action::InsertChar(c))
            }
            _ => None,
        },
        Mode::Normal => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return match key.code {
                    KeyCode::Char('d') => Some(Action::ScrollPageDown),
                    KeyCode::Char('u') => Some(Action::ScrollPageUp),
                    _ => None,
                };
            }

            match key.code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char(':') => Some(Action::OpenPrompt),

                KeyCode::Char('b') => Some(Action::ToggleSidebar),
                KeyCode::Char('v') => Some(Action::ToggleView),
                KeyCode::Char('t') => Some(Action::ToggleTheme),
                KeyCode::Char('r') => Some(Action::Retry),
                KeyCode::Char('s') => Some(Action::CyclePageSize),
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),

                KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
                KeyCode::Char('h') | KeyCode::Left => Some(Action::MoveLeft),
                KeyCode::Char('l') | KeyCode::Right => Some(Action::MoveRight),
                KeyCode::PageUp => Some(Action::ScrollPageUp),
                KeyCode::PageDown => Some(Action::ScrollPageDown),
                KeyCode::Char('[') => Some(Action::PrevPage),
                KeyCode::Char(']') => Some(Action::NextPage),
                KeyCode::Enter => Some(Action::Activate),

                _ => None,
            }
        }
    }
}

/// Key hints shown in the help line.
pub const HELP_LINE: &str = "q quit  : go to  v list/grid  t theme  b sidebar  r retry  \
     [/] page  s page size  ⏎ open  esc back";
