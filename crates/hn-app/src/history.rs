//! Snapshot-based undo/redo.
//!
//! Copy-the-world snapshots: the model is small (tens to low hundreds of
//! elements), so a full deep copy per recorded edit is cheaper than
//! command diffing and cannot get referential integrity wrong.

use hn_model::Network;

/// An immutable deep copy of the network's undoable state.
///
/// Project name is deliberately absent: renames are metadata, not edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Network);

impl Snapshot {
    pub fn capture(network: &Network) -> Self {
        Self(network.clone())
    }

    pub fn as_network(&self) -> &Network {
        &self.0
    }

    pub fn into_network(self) -> Network {
        self.0
    }
}

/// History tuning. Capacity is a memory bound, not a correctness rule:
/// when set, the oldest entry is evicted once `past` exceeds it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryConfig {
    pub capacity: Option<usize>,
}

/// The two-stack undo machine.
#[derive(Debug, Default)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
    config: HistoryConfig,
}

impl History {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            config,
        }
    }

    /// Record the pre-mutation state of a completed edit. Any redo branch
    /// is discarded.
    pub fn record(&mut self, before: Snapshot) {
        self.past.push(before);
        self.future.clear();
        if let Some(capacity) = self.config.capacity {
            while self.past.len() > capacity {
                self.past.remove(0);
            }
        }
    }

    /// Pop the most recent pre-edit state, moving `current` to the redo
    /// stack. None when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.past.pop()?;
        self.future.push(current);
        Some(snapshot)
    }

    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.future.pop()?;
        self.past.push(current);
        Some(snapshot)
    }

    /// Forget everything; a wholesale load is not undoable.
    pub fn reset(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::Position;
    use hn_model::NodeKind;

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut history = History::default();
        let current = Snapshot::capture(&Network::new());
        assert!(history.undo(current).is_none());
        // A failed undo must not grow the redo stack.
        assert!(!history.can_redo());
    }

    #[test]
    fn record_discards_redo_branch() {
        let mut history = History::default();
        let empty = Snapshot::capture(&Network::new());

        let mut network = Network::new();
        network.add_node(NodeKind::Reservoir, Position::default());
        let one_node = Snapshot::capture(&network);

        history.record(empty.clone());
        history.undo(one_node.clone()).unwrap();
        assert!(history.can_redo());

        history.record(empty);
        assert!(!history.can_redo());
    }

    #[test]
    fn capacity_evicts_oldest_entry() {
        let mut history = History::new(HistoryConfig { capacity: Some(2) });
        let mut network = Network::new();
        let first = Snapshot::capture(&network);
        network.add_node(NodeKind::Junction, Position::default());
        let second = Snapshot::capture(&network);
        network.add_node(NodeKind::Junction, Position::default());
        let third = Snapshot::capture(&network);

        history.record(first);
        history.record(second.clone());
        history.record(third);
        assert_eq!(history.undo_depth(), 2);

        // The oldest entry (empty network) was evicted; the deepest undo
        // now lands on the one-node state.
        let current = Snapshot::capture(&network);
        history.undo(current.clone()).unwrap();
        let deepest = history.undo(current).unwrap();
        assert_eq!(deepest, second);
    }
}
