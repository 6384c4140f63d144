//! Key mapping for the session states.
//!
//! Text input is handled by the form itself; everything else goes through
//! [`KeyAction`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed outside the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Menu navigation
    MoveUp,
    MoveDown,
    Select,

    // Menu operations
    /// Flip the delete-after-copy flag.
    ToggleWipe,
    /// Delete the preset under the cursor.
    DeletePreset,

    // Done view
    /// Leave the completion view.
    Dismiss,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Map a key pressed on the menu.
    pub fn menu(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,

            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Enter, _) => KeyAction::Select,

            (KeyCode::Char('w'), KeyModifiers::NONE) => KeyAction::ToggleWipe,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::DeletePreset,

            _ => KeyAction::None,
        }
    }

    /// Map a key pressed while a migration is running.
    ///
    /// Leaving does not stop the worker.
    pub fn copying(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Esc, _) => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// Map a key pressed on the completion view.
    pub fn done(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Dismiss,
            _ => KeyAction::None,
        }
    }
}

/// Key binding for display in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

const fn binding(keys: &'static str, description: &'static str) -> KeyBinding {
    KeyBinding { keys, description }
}

pub const MENU_BINDINGS: &[KeyBinding] = &[
    binding("j/k", "Nav"),
    binding("Enter", "Select"),
    binding("w", "Wipe"),
    binding("d", "Del"),
    binding("q", "Quit"),
];

pub const INPUT_BINDINGS: &[KeyBinding] = &[
    binding("Tab/S-Tab", "Field"),
    binding("Enter", "Next/Start"),
    binding("Esc", "Cancel"),
];

pub const COPYING_BINDINGS: &[KeyBinding] = &[binding("Esc", "Quit")];

pub const DONE_BINDINGS: &[KeyBinding] = &[binding("Enter", "Menu"), binding("q", "Quit")];
