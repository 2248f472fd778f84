//! Bounded linear undo/redo history over immutable snapshots.
//!
//! [`HistoryState`] is a plain serializable value. Its transitions
//! (`set`, `undo`, `redo`, `reset`) consume the state and return the next
//! one, so an editing session can store, restore or ship its history without
//! being tied to any UI lifecycle. [`HistoryManager`] wraps a state for
//! callers that prefer `&mut self` methods.
//!
//! ```text
//!        undo                      redo
//!   past ◄──── present ────► future
//!   (≤ capacity, oldest evicted)   (cleared by set)
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of snapshots kept in `past`.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

// ============================================================================
// HistoryState
// ============================================================================

/// Undo/redo state for one edited document.
///
/// `T` is compared with [`PartialEq`] (structural equality) to decide whether
/// a `set` is a no-op.
///
/// A saved state is rejected on load if its capacity is 0 or its `past`
/// holds more entries than the capacity allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SavedHistory<T>")]
pub struct HistoryState<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    initial: T,
    capacity: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedHistory<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    initial: T,
    capacity: usize,
}

impl<T> TryFrom<SavedHistory<T>> for HistoryState<T> {
    type Error = String;

    fn try_from(saved: SavedHistory<T>) -> Result<Self, Self::Error> {
        if saved.capacity == 0 {
            return Err("history capacity must be at least 1".to_owned());
        }
        if saved.past.len() > saved.capacity {
            return Err(format!(
                "history holds {} past entries but its capacity is {}",
                saved.past.len(),
                saved.capacity
            ));
        }
        Ok(Self {
            past: saved.past,
            present: saved.present,
            future: saved.future,
            initial: saved.initial,
            capacity: saved.capacity,
        })
    }
}

impl<T: Clone + PartialEq> HistoryState<T> {
    /// Starts a history at `initial` with the default capacity.
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// Starts a history at `initial`, keeping at most `capacity` past entries.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial.clone(),
            future: VecDeque::new(),
            initial,
            capacity: capacity.max(1),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn initial(&self) -> &T {
        &self.initial
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots available to undo, oldest first.
    pub fn past(&self) -> impl ExactSizeIterator<Item = &T> {
        self.past.iter()
    }

    /// Snapshots available to redo, next first.
    pub fn future(&self) -> impl ExactSizeIterator<Item = &T> {
        self.future.iter()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Records `next` as the present snapshot.
    ///
    /// No-op when `next` equals the present snapshot. Otherwise the redo
    /// branch is discarded.
    pub fn set(mut self, next: T) -> Self {
        self.apply_set(next);
        self
    }

    /// Steps back one snapshot. No-op when there is nothing to undo.
    pub fn undo(mut self) -> Self {
        self.apply_undo();
        self
    }

    /// Steps forward one snapshot. No-op when there is nothing to redo.
    pub fn redo(mut self) -> Self {
        self.apply_redo();
        self
    }

    /// Returns to the initial snapshot as a new, undoable edit.
    ///
    /// Unlike a plain push of the present snapshot, nothing is recorded when
    /// the present already equals the initial snapshot; the redo branch is
    /// still cleared. This keeps `reset` consistent with the `set` no-op rule.
    pub fn reset(mut self) -> Self {
        self.apply_reset();
        self
    }

    fn apply_set(&mut self, next: T) -> bool {
        if next == self.present {
            tracing::debug!("history set skipped, snapshot unchanged");
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.push_past(previous);
        self.future.clear();
        true
    }

    fn apply_undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "undo");
        true
    }

    fn apply_redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "redo");
        true
    }

    fn apply_reset(&mut self) -> bool {
        if self.present == self.initial {
            self.future.clear();
            return false;
        }
        let current = std::mem::replace(&mut self.present, self.initial.clone());
        self.push_past(current);
        self.future.clear();
        true
    }

    fn push_past(&mut self, snapshot: T) {
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}

// ============================================================================
// HistoryManager
// ============================================================================

/// Owns a [`HistoryState`] for a single editing session.
///
/// Methods return `true` when the present snapshot changed.
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    state: HistoryState<T>,
}

impl<T: Clone + PartialEq> HistoryManager<T> {
    pub fn new(initial: T) -> Self {
        Self::from_state(HistoryState::new(initial))
    }

    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self::from_state(HistoryState::with_capacity(initial, capacity))
    }

    /// Resumes a previously saved history.
    pub fn from_state(state: HistoryState<T>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &HistoryState<T> {
        &self.state
    }

    pub fn into_state(self) -> HistoryState<T> {
        self.state
    }

    pub fn present(&self) -> &T {
        self.state.present()
    }

    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.can_redo()
    }

    pub fn set(&mut self, next: T) -> bool {
        self.state.apply_set(next)
    }

    /// Applies `edit` to a copy of the present snapshot and records the result.
    pub fn update(&mut self, edit: impl FnOnce(&T) -> T) -> bool {
        let next = edit(self.state.present());
        self.state.apply_set(next)
    }

    pub fn undo(&mut self) -> bool {
        self.state.apply_undo()
    }

    pub fn redo(&mut self) -> bool {
        self.state.apply_redo()
    }

    pub fn reset(&mut self) -> bool {
        self.state.apply_reset()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pushes_past_and_clears_future() {
        let h = HistoryState::new(0).set(1).set(2).undo();
        assert_eq!(*h.present(), 1);
        assert!(h.can_redo());

        let h = h.set(5);
        assert_eq!(*h.present(), 5);
        assert!(!h.can_redo());
        assert_eq!(h.past().copied().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn set_equal_value_is_noop() {
        let h = HistoryState::new(vec![1, 2]).set(vec![1, 2, 3]);
        let again = h.clone().set(vec![1, 2, 3]);
        assert_eq!(again.past().len(), h.past().len());
        assert_eq!(again, h);
    }

    #[test]
    fn undo_redo_restore_exact_snapshots() {
        let h = HistoryState::new("a".to_string())
            .set("b".to_string())
            .set("c".to_string());

        let h = h.undo();
        assert_eq!(h.present(), "b");
        let h = h.undo();
        assert_eq!(h.present(), "a");
        let h = h.redo();
        assert_eq!(h.present(), "b");
        let h = h.redo();
        assert_eq!(h.present(), "c");
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_and_redo_on_empty_are_noops() {
        let h = HistoryState::new(7);
        assert_eq!(h.clone().undo(), h);
        assert_eq!(h.clone().redo(), h);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let h = (1..=60).fold(HistoryState::new(0), |h, v| h.set(v));
        assert_eq!(h.past().len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(h.past().next().copied(), Some(10));

        let h = (0..60).fold(h, |h, _| h.undo());
        // Only 50 undos were possible: 60 -> 10.
        assert_eq!(*h.present(), 10);
        assert!(!h.can_undo());
    }

    #[test]
    fn reset_returns_to_initial_and_is_undoable() {
        let h = HistoryState::new(0).set(1).set(2).undo().reset();
        assert_eq!(*h.present(), 0);
        assert!(!h.can_redo());

        let h = h.undo();
        assert_eq!(*h.present(), 1);
    }

    #[test]
    fn reset_at_initial_adds_no_entry() {
        let h = HistoryState::new(0).set(1).undo();
        let reset = h.clone().reset();
        assert_eq!(reset.past().len(), h.past().len());
        assert!(!reset.can_redo());
    }

    #[test]
    fn manager_reports_changes() {
        let mut manager = HistoryManager::with_capacity(String::from("x"), 2);
        assert!(manager.set("y".into()));
        assert!(!manager.set("y".into()));
        assert!(manager.update(|s| format!("{s}z")));
        assert_eq!(manager.present(), "yz");
        assert!(manager.set("w".into()));
        assert_eq!(manager.state().past().len(), 2);

        assert!(manager.undo());
        assert!(manager.undo());
        assert!(!manager.undo());
        assert_eq!(manager.present(), "y");
        assert!(manager.redo());
        assert_eq!(manager.present(), "yz");
    }

    #[test]
    fn state_serializes() {
        let h = HistoryState::with_capacity(1u32, 3).set(2).set(3).undo();
        let json = serde_json::to_string(&h).unwrap();
        let restored: HistoryState<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, h);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["present"], 2);
        assert_eq!(value["future"], serde_json::json!([3]));
    }

    #[test]
    fn restore_rejects_zero_capacity() {
        let json = r#"{"past":[],"present":1,"future":[],"initial":1,"capacity":0}"#;
        let err = serde_json::from_str::<HistoryState<u32>>(json).unwrap_err();
        assert!(err.to_string().contains("capacity must be at least 1"), "{err}");
    }

    #[test]
    fn restore_rejects_past_over_capacity() {
        let json = r#"{"past":[1,2,3],"present":4,"future":[],"initial":1,"capacity":2}"#;
        let err = serde_json::from_str::<HistoryState<u32>>(json).unwrap_err();
        assert!(err.to_string().contains("3 past entries"), "{err}");

        let json = r#"{"past":[1,2],"present":4,"future":[],"initial":1,"capacity":2}"#;
        let restored: HistoryState<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(restored.past().len(), 2);
        assert!(restored.can_undo());
    }
}
