//! Navigation over an ungrouped list.

use super::Cursor;

/// Focus over individual notifications.
///
/// `Enter` marks the focused notification read and the dismiss keys
/// dismiss it.
#[derive(Debug, Clone, Default)]
pub struct FlatNavigator {
    cursor: Cursor,
}

impl FlatNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.cursor.focused()
    }

    pub fn next(&mut self, len: usize) -> Option<usize> {
        self.cursor.next(len)
    }

    pub fn previous(&mut self, len: usize) -> Option<usize> {
        self.cursor.previous(len)
    }

    pub fn first(&mut self, len: usize) -> Option<usize> {
        self.cursor.first(len)
    }

    pub fn last(&mut self, len: usize) -> Option<usize> {
        self.cursor.last(len)
    }

    /// Called after the list changes size, for example after a dismiss.
    pub fn sync(&mut self, len: usize) {
        self.cursor.clamp(len);
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
    }
}
