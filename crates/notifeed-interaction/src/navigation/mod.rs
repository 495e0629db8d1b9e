//! Focus cursors for the flat and grouped feed layouts.
//!
//! Both share the same wrapping cursor. The flat navigator moves over
//! notifications; the grouped navigator moves over group headers.

pub mod flat;
pub mod grouped;

pub use flat::FlatNavigator;
pub use grouped::GroupedNavigator;

/// A wrapping focus index over `len` items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    focused: Option<usize>,
}

impl Cursor {
    pub(crate) fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Moves down, wrapping from the last item to the first.
    pub(crate) fn next(&mut self, len: usize) -> Option<usize> {
        self.focused = match (len, self.focused) {
            (0, _) => None,
            (_, Some(i)) if i + 1 < len => Some(i + 1),
            _ => Some(0),
        };
        self.focused
    }

    /// Moves up, wrapping from the first item to the last.
    pub(crate) fn previous(&mut self, len: usize) -> Option<usize> {
        self.focused = match (len, self.focused) {
            (0, _) => None,
            (_, Some(i)) if i > 0 && i < len => Some(i - 1),
            _ => Some(len - 1),
        };
        self.focused
    }

    pub(crate) fn first(&mut self, len: usize) -> Option<usize> {
        self.focused = (len > 0).then_some(0);
        self.focused
    }

    pub(crate) fn last(&mut self, len: usize) -> Option<usize> {
        self.focused = len.checked_sub(1);
        self.focused
    }

    /// Keeps the focus inside a list that shrank.
    pub(crate) fn clamp(&mut self, len: usize) {
        self.focused = match self.focused {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    pub(crate) fn reset(&mut self) {
        self.focused = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut cursor = Cursor::default();
        assert_eq!(cursor.next(3), Some(0));
        assert_eq!(cursor.next(3), Some(1));
        assert_eq!(cursor.next(3), Some(2));
        assert_eq!(cursor.next(3), Some(0));
        assert_eq!(cursor.previous(3), Some(2));

        let mut fresh = Cursor::default();
        assert_eq!(fresh.previous(3), Some(2));
    }

    #[test]
    fn test_cursor_empty_and_clamp() {
        let mut cursor = Cursor::default();
        assert_eq!(cursor.next(0), None);
        assert_eq!(cursor.last(0), None);
        assert_eq!(cursor.last(5), Some(4));
        cursor.clamp(2);
        assert_eq!(cursor.focused(), Some(1));
        cursor.clamp(0);
        assert_eq!(cursor.focused(), None);
    }
}
