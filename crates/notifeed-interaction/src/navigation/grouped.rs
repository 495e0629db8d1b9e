//! Navigation over group headers.

use super::Cursor;

/// Focus over groups.
///
/// `Enter` toggles the focused group and `Space` toggles every group.
/// Individual notifications are not focusable in this layout.
#[derive(Debug, Clone, Default)]
pub struct GroupedNavigator {
    cursor: Cursor,
}

impl GroupedNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.cursor.focused()
    }

    pub fn next(&mut self, groups: usize) -> Option<usize> {
        self.cursor.next(groups)
    }

    pub fn previous(&mut self, groups: usize) -> Option<usize> {
        self.cursor.previous(groups)
    }

    pub fn first(&mut self, groups: usize) -> Option<usize> {
        self.cursor.first(groups)
    }

    pub fn last(&mut self, groups: usize) -> Option<usize> {
        self.cursor.last(groups)
    }

    pub fn sync(&mut self, groups: usize) {
        self.cursor.clamp(groups);
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
    }
}
