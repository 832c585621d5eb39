//! Undo log for comparison rounds.

use crate::color::Rgb;

/// Snapshot of the mutable session state taken just before a choice is
/// applied. Restoring it rewinds the session to the moment the round was
/// shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub round_index: usize,
    pub color: Rgb,
}

/// LIFO stack of [`RoundState`] snapshots, most recent last. Pushed on every
/// accepted choice, popped on back navigation, cleared when a session is
/// reset. Owned exclusively by the session controller.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    snapshots: Vec<RoundState>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: RoundState) {
        self.snapshots.push(state);
    }

    pub fn pop(&mut self) -> Option<RoundState> {
        self.snapshots.pop()
    }

    /// Most recent snapshot, the color the user saw one round ago.
    pub fn last(&self) -> Option<&RoundState> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
