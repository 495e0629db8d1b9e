//! Key and focus model.

use serde::{Deserialize, Serialize};

/// A key the feed reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Escape,
    Delete,
    Backspace,
    Space,
    /// Anything else.
    Other,
}

impl Key {
    /// Parses a DOM-style key name (`"j"`, `"ArrowDown"`, `" "`).
    pub fn parse(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Delete" | "Del" => Self::Delete,
            "Backspace" => Self::Backspace,
            " " | "Space" | "Spacebar" => Self::Space,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// What currently holds input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusTarget {
    /// The page or a non-editable element.
    #[default]
    Document,
    /// A text input or textarea.
    TextInput,
    /// A select control.
    Select,
}

impl FocusTarget {
    /// Whether keystrokes belong to a form control.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::TextInput | Self::Select)
    }
}

/// A key press plus where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub focus: FocusTarget,
}

impl KeyEvent {
    /// A key press with the document focused.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            focus: FocusTarget::Document,
        }
    }

    /// A key press inside `focus`.
    pub fn in_target(key: Key, focus: FocusTarget) -> Self {
        Self { key, focus }
    }
}
