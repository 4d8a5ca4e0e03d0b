use std::collections::VecDeque;

/// Number of undo steps kept before the oldest is dropped.
pub const HISTORY_LIMIT: usize = 100;

/// Bounded undo/redo stacks of immutable snapshots.
#[derive(Clone, Debug)]
pub struct History<T> {
    undo: VecDeque<T>,
    redo: Vec<T>,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl<T> History<T> {
    pub fn with_limit(limit: usize) -> Self {
        History {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Remember the value as it was before a committed edit. A new edit
    /// invalidates anything that could have been redone.
    pub fn record(&mut self, previous: T) {
        self.undo.push_back(previous);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Step back: `current` goes to the redo stack, the previous value is
    /// returned. `None` (and `current` dropped) when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let prev = self.undo.pop_back()?;
        self.redo.push(current);
        Some(prev)
    }

    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_then_redo_restores_values() {
        let mut h = History::default();
        let mut cur = 1;
        h.record(cur);
        cur = 2;
        h.record(cur);
        cur = 3;

        cur = h.undo(cur).unwrap();
        assert_eq!(cur, 2);
        cur = h.undo(cur).unwrap();
        assert_eq!(cur, 1);
        assert!(!h.can_undo());
        assert_eq!(h.undo(cur), None);

        cur = h.redo(cur).unwrap();
        assert_eq!(cur, 2);
        cur = h.redo(cur).unwrap();
        assert_eq!(cur, 3);
        assert!(!h.can_redo());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut h = History::default();
        h.record("a");
        let cur = h.undo("b").unwrap();
        assert!(h.can_redo());
        h.record(cur);
        assert!(!h.can_redo());
        assert!(h.can_undo());
    }

    #[test]
    fn oldest_entries_are_dropped() {
        let mut h = History::default();
        for i in 0..(HISTORY_LIMIT + 25) {
            h.record(i);
        }
        assert_eq!(h.undo_len(), HISTORY_LIMIT);
        let mut cur = usize::MAX;
        let mut last = None;
        while let Some(prev) = h.undo(cur) {
            last = Some(prev);
            cur = prev;
        }
        assert_eq!(last, Some(25));
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut h = History::with_limit(3);
        h.record(1);
        let _ = h.undo(2);
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
