//! Keyboard bindings for the notification panel.
//!
//! | Key                          | Flat layout    | Grouped layout   |
//! |------------------------------|----------------|------------------|
//! | `n`                          | toggle panel   | toggle panel     |
//! | `Escape`                     | close panel    | close panel      |
//! | `j` / `ArrowDown`            | next           | next group       |
//! | `k` / `ArrowUp`              | previous       | previous group   |
//! | `Home` / `End`               | first / last   | first / last     |
//! | `Enter`                      | mark read      | toggle group     |
//! | `x` / `Delete` / `Backspace` | dismiss        |                  |
//! | `Space`                      |                | toggle all       |
//!
//! Nothing fires while a text input or select has focus, and only the
//! panel bindings fire while the panel is closed.

use serde::Serialize;
use tracing::trace;

use notifeed_entity::GroupMode;

use crate::keys::{Key, KeyEvent};
use crate::navigation::{FlatNavigator, GroupedNavigator};

/// What the caller should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "index", rename_all = "snake_case")]
pub enum KeyAction {
    TogglePanel,
    ClosePanel,
    /// Move focus to the item or group at this index.
    Focus(usize),
    MarkRead(usize),
    Dismiss(usize),
    ToggleGroup(usize),
    ToggleAllGroups,
    None,
}

/// The panel state a key is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub panel_open: bool,
    pub group_mode: GroupMode,
    /// Visible notifications in the flat layout, groups otherwise.
    pub len: usize,
}

/// Routes key events to the navigator for the active layout.
#[derive(Debug, Clone, Default)]
pub struct KeyboardController {
    flat: FlatNavigator,
    grouped: GroupedNavigator,
    mode: GroupMode,
}

impl KeyboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused index in the active layout.
    pub fn focused(&self) -> Option<usize> {
        if self.mode.is_grouped() {
            self.grouped.focused()
        } else {
            self.flat.focused()
        }
    }

    pub fn handle(&mut self, event: &KeyEvent, ctx: &KeyContext) -> KeyAction {
        if event.focus.is_editable() {
            return KeyAction::None;
        }

        if ctx.group_mode != self.mode {
            self.mode = ctx.group_mode;
            self.reset();
        }

        let action = match event.key {
            Key::Char('n') => {
                if ctx.panel_open {
                    self.reset();
                }
                KeyAction::TogglePanel
            }
            Key::Escape if ctx.panel_open => {
                self.reset();
                KeyAction::ClosePanel
            }
            _ if !ctx.panel_open => KeyAction::None,
            key if ctx.group_mode.is_grouped() => self.handle_grouped(key, ctx.len),
            key => self.handle_flat(key, ctx.len),
        };
        trace!(?event, ?action, "Key handled");
        action
    }

    /// Forgets focus in both layouts.
    pub fn reset(&mut self) {
        self.flat.reset();
        self.grouped.reset();
    }

    fn handle_flat(&mut self, key: Key, len: usize) -> KeyAction {
        self.flat.sync(len);
        let nav = &mut self.flat;
        let moved = match key {
            Key::Char('j') | Key::ArrowDown => nav.next(len),
            Key::Char('k') | Key::ArrowUp => nav.previous(len),
            Key::Home => nav.first(len),
            Key::End => nav.last(len),
            Key::Enter => return nav.focused().map_or(KeyAction::None, KeyAction::MarkRead),
            Key::Char('x') | Key::Delete | Key::Backspace => {
                return nav.focused().map_or(KeyAction::None, KeyAction::Dismiss);
            }
            _ => return KeyAction::None,
        };
        moved.map_or(KeyAction::None, KeyAction::Focus)
    }

    fn handle_grouped(&mut self, key: Key, groups: usize) -> KeyAction {
        self.grouped.sync(groups);
        let nav = &mut self.grouped;
        let moved = match key {
            Key::Char('j') | Key::ArrowDown => nav.next(groups),
            Key::Char('k') | Key::ArrowUp => nav.previous(groups),
            Key::Home => nav.first(groups),
            Key::End => nav.last(groups),
            Key::Enter => {
                return nav
                    .focused()
                    .map_or(KeyAction::None, KeyAction::ToggleGroup);
            }
            Key::Space if groups > 0 => return KeyAction::ToggleAllGroups,
            _ => return KeyAction::None,
        };
        moved.map_or(KeyAction::None, KeyAction::Focus)
    }
}
