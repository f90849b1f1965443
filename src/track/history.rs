//! Global undo history of waypoint edits
use super::WaypointId;

/// LIFO of the waypoints touched by each recorded edit, most recent last
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryStack {
    entries: Vec<WaypointId>,
}

impl HistoryStack {
    pub fn new() -> Self {
        HistoryStack::default()
    }

    pub(crate) fn from_entries(entries: Vec<WaypointId>) -> Self {
        HistoryStack { entries }
    }

    /// Record that the given waypoint was created or moved
    pub fn push(&mut self, id: WaypointId) {
        self.entries.push(id);
    }

    /// Remove and return the most recently edited waypoint, `None` when there is nothing to undo
    pub fn pop(&mut self) -> Option<WaypointId> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<WaypointId> {
        self.entries.last().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[WaypointId] {
        &self.entries
    }
}
