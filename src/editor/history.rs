// SPDX-License-Identifier: MPL-2.0
//! Linear undo/redo log.

use crate::error::{Error, HistoryDirection, Result};

/// Undo/redo log around a current value.
///
/// `past` holds older values (oldest first), `future` holds values undone
/// since the last push (next redo last). Pushing a new value clears the
/// future; there is no branching history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStack<T> {
    past: Vec<T>,
    current: T,
    future: Vec<T>,
    max_depth: Option<usize>,
}

impl<T: Clone> HistoryStack<T> {
    /// Creates an unbounded history starting at `initial`.
    pub fn new(initial: T) -> Self {
        Self::with_depth(initial, None)
    }

    /// Creates a history that keeps at most `max_depth` undo steps.
    pub fn with_depth(initial: T, max_depth: Option<usize>) -> Self {
        Self {
            past: Vec::new(),
            current: initial,
            future: Vec::new(),
            max_depth,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether an undo operation is currently possible.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo operation is currently possible.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// Makes `snapshot` current, clears the redo log and evicts the oldest
    /// undo step if the depth bound is exceeded.
    pub fn push(&mut self, snapshot: T) {
        let previous = std::mem::replace(&mut self.current, snapshot);
        self.past.push(previous);
        self.future.clear();

        if let Some(depth) = self.max_depth {
            if self.past.len() > depth {
                let excess = self.past.len() - depth;
                self.past.drain(..excess);
                tracing::debug!(evicted = excess, depth, "history depth exceeded");
            }
        }
    }

    /// Steps back one snapshot and returns the new current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HistoryEmpty`] and leaves the stack untouched when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Result<&T> {
        let previous = self
            .past
            .pop()
            .ok_or(Error::HistoryEmpty(HistoryDirection::Undo))?;
        let current = std::mem::replace(&mut self.current, previous);
        self.future.push(current);
        Ok(&self.current)
    }

    /// Steps forward one snapshot and returns the new current value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HistoryEmpty`] and leaves the stack untouched when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Result<&T> {
        let next = self
            .future
            .pop()
            .ok_or(Error::HistoryEmpty(HistoryDirection::Redo))?;
        let current = std::mem::replace(&mut self.current, next);
        self.past.push(current);
        Ok(&self.current)
    }

    /// Drops all undo and redo steps, keeping the current value.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_has_nothing_to_undo_or_redo() {
        let history = HistoryStack::new(0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(*history.current(), 0);
    }

    #[test]
    fn undo_on_empty_history_reports_and_keeps_state() {
        let mut history = HistoryStack::new("start");
        assert_eq!(
            history.undo(),
            Err(Error::HistoryEmpty(HistoryDirection::Undo))
        );
        assert_eq!(
            history.redo(),
            Err(Error::HistoryEmpty(HistoryDirection::Redo))
        );
        assert_eq!(*history.current(), "start");
    }

    #[test]
    fn undo_and_redo_move_between_snapshots() {
        let mut history = HistoryStack::new(1);
        history.push(2);
        history.push(3);

        assert_eq!(history.undo(), Ok(&2));
        assert_eq!(history.undo(), Ok(&1));
        assert!(!history.can_undo());
        assert_eq!(history.redo(), Ok(&2));
        assert_eq!(history.redo(), Ok(&3));
        assert!(!history.can_redo());
    }

    #[test]
    fn pushing_after_undo_discards_redo_stack() {
        let mut history = HistoryStack::new('a');
        history.push('b');
        history.push('c');
        history.undo().expect("undo");
        assert!(history.can_redo());

        history.push('d');
        assert!(!history.can_redo());
        assert_eq!(*history.current(), 'd');
        assert_eq!(history.undo(), Ok(&'b'));
    }

    #[test]
    fn depth_bound_evicts_oldest_entries() {
        let mut history = HistoryStack::with_depth(0, Some(2));
        for value in 1..=5 {
            history.push(value);
        }
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo(), Ok(&4));
        assert_eq!(history.undo(), Ok(&3));
        assert!(history.undo().is_err());
        assert_eq!(*history.current(), 3);
    }

    #[test]
    fn zero_depth_keeps_no_undo_steps() {
        let mut history = HistoryStack::with_depth(0, Some(0));
        history.push(1);
        assert!(!history.can_undo());
        assert_eq!(*history.current(), 1);
    }

    #[test]
    fn n_undos_then_n_redos_restore_final_state() {
        let mut history = HistoryStack::new(0_u32);
        for value in 1..=10 {
            history.push(value * 7);
        }
        for _ in 0..10 {
            history.undo().expect("undo");
        }
        assert_eq!(*history.current(), 0);
        for _ in 0..10 {
            history.redo().expect("redo");
        }
        assert_eq!(*history.current(), 70);
    }

    #[test]
    fn clear_keeps_current_value() {
        let mut history = HistoryStack::new(1);
        history.push(2);
        history.clear();
        assert!(!history.can_undo());
        assert_eq!(*history.current(), 2);
    }
}
