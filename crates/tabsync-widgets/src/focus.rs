#![forbid(unsafe_code)]

//! Roving focus over a fixed-length row of labels.
//!
//! Exactly zero or one label holds focus. Horizontal moves wrap at both ends.

/// Focus cursor for a row of `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RovingFocus {
    len: usize,
    index: Option<usize>,
}

impl RovingFocus {
    /// Unfocused cursor over `len` items.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, index: None }
    }

    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Focus `index`. Out-of-range indices are rejected.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = Some(index);
        true
    }

    pub fn blur(&mut self) {
        self.index = None;
    }

    /// Move right, wrapping from the last item to the first.
    pub fn next(&mut self) -> Option<usize> {
        let current = self.index?;
        let next = (current + 1) % self.len;
        self.index = Some(next);
        Some(next)
    }

    /// Move left, wrapping from the first item to the last.
    pub fn previous(&mut self) -> Option<usize> {
        let current = self.index?;
        let prev = if current == 0 { self.len - 1 } else { current - 1 };
        self.index = Some(prev);
        Some(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_wrap_at_both_ends() {
        let mut focus = RovingFocus::new(3);
        assert!(focus.focus(2));
        assert_eq!(focus.next(), Some(0));
        assert_eq!(focus.previous(), Some(2));
        assert_eq!(focus.previous(), Some(1));
    }

    #[test]
    fn unfocused_moves_are_no_ops() {
        let mut focus = RovingFocus::new(3);
        assert_eq!(focus.next(), None);
        assert_eq!(focus.previous(), None);
        assert_eq!(focus.index(), None);
    }

    #[test]
    fn focus_rejects_out_of_range() {
        let mut focus = RovingFocus::new(2);
        assert!(!focus.focus(2));
        assert!(focus.focus(1));
        focus.blur();
        assert_eq!(focus.index(), None);
    }

    #[test]
    fn single_item_wraps_onto_itself() {
        let mut focus = RovingFocus::new(1);
        focus.focus(0);
        assert_eq!(focus.next(), Some(0));
        assert_eq!(focus.previous(), Some(0));
    }
}
