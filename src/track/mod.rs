//! Waypoint storage, edit history and undo
use crate::gps::Coordinate;
use crate::Error;
use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

mod history;
pub use history::HistoryStack;
pub mod path;

/// Waypoint identifier, the insertion index of the waypoint in its store
pub type WaypointId = usize;

/// One recorded geographic point along with its own edit history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    id: WaypointId,
    /// most recent position first
    position_history: Vec<Coordinate>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Waypoint {
    fn new(id: WaypointId, position: Coordinate, created_at: DateTime<Utc>) -> Self {
        Waypoint {
            id,
            position_history: vec![position],
            created_at,
            description: None,
        }
    }

    pub fn id(&self) -> WaypointId {
        self.id
    }

    /// Return the current position, `None` for a tombstone
    pub fn position(&self) -> Option<Coordinate> {
        self.position_history.first().copied()
    }

    pub fn position_history(&self) -> &[Coordinate] {
        &self.position_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// A waypoint is active while it has at least one recorded position
    pub fn is_active(&self) -> bool {
        !self.position_history.is_empty()
    }
}

/// Outcome of undoing the most recent edit
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reverted {
    /// The waypoint fell back to an earlier position
    Moved {
        id: WaypointId,
        position: Coordinate,
    },
    /// The waypoint's last position was removed, any rendered marker must be detached
    Tombstoned { id: WaypointId },
}

impl Reverted {
    pub fn id(&self) -> WaypointId {
        match self {
            Reverted::Moved { id, .. } => *id,
            Reverted::Tombstoned { id } => *id,
        }
    }
}

/// Ordered collection of waypoints and the history used to undo edits to them
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
    history: HistoryStack,
}

impl WaypointStore {
    pub fn new() -> Self {
        WaypointStore::default()
    }

    /// Rebuild a store from persisted parts, waypoint ids must match their index
    pub(crate) fn from_parts(waypoints: Vec<Waypoint>, history: HistoryStack) -> Self {
        WaypointStore { waypoints, history }
    }

    /// Append a new waypoint at the given position created now
    pub fn create(&mut self, position: Coordinate) -> WaypointId {
        self.create_at(position, Utc::now())
    }

    /// Append a new waypoint at the given position with an explicit creation time
    pub fn create_at(&mut self, position: Coordinate, created_at: DateTime<Utc>) -> WaypointId {
        let id = self.waypoints.len();
        self.waypoints.push(Waypoint::new(id, position, created_at));
        self.history.push(id);
        debug!(
            "Created waypoint {} at ({}, {})",
            id,
            position.latitude(),
            position.longitude()
        );
        id
    }

    /// Move a waypoint to a new position, a tombstoned waypoint becomes active again
    pub fn move_waypoint(&mut self, id: WaypointId, position: Coordinate) -> Result<(), Error> {
        let waypoint = self
            .waypoints
            .get_mut(id)
            .ok_or(Error::UnknownWaypointId(id))?;
        waypoint.position_history.insert(0, position);
        self.history.push(id);
        debug!(
            "Moved waypoint {} to ({}, {})",
            id,
            position.latitude(),
            position.longitude()
        );
        Ok(())
    }

    /// Undo the most recent create or move. Returns `None` when there is nothing to undo.
    pub fn revert(&mut self) -> Option<Reverted> {
        let id = match self.history.pop() {
            Some(id) => id,
            None => {
                trace!("Nothing to undo");
                return None;
            }
        };
        // history only ever holds ids handed out by this store
        let waypoint = self.waypoints.get_mut(id)?;
        if !waypoint.position_history.is_empty() {
            waypoint.position_history.remove(0);
        }
        let reverted = match waypoint.position() {
            Some(position) => Reverted::Moved { id, position },
            None => Reverted::Tombstoned { id },
        };
        debug!("Reverted last edit: {:?}", reverted);
        Some(reverted)
    }

    /// Overwrite the description of a waypoint
    pub fn set_description(&mut self, id: WaypointId, text: String) -> Result<(), Error> {
        let waypoint = self
            .waypoints
            .get_mut(id)
            .ok_or(Error::UnknownWaypointId(id))?;
        waypoint.description = Some(text);
        Ok(())
    }

    /// Remove every waypoint and all history
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.history.clear();
        debug!("Cleared all waypoints");
    }

    /// Iterate over waypoints that still have a position, in ascending id order
    pub fn active_waypoints(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.iter().filter(|w| w.is_active())
    }

    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id)
    }

    /// All stored waypoints including tombstones
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Distance in meters from a waypoint to the nearest active waypoint with a lower id, tombstones
    /// are skipped. Zero when no such waypoint exists or the waypoint itself is a tombstone.
    pub fn distance_from_previous(&self, id: WaypointId) -> f64 {
        let current = match self.get(id).and_then(|w| w.position()) {
            Some(pos) => pos,
            None => return 0.0,
        };
        self.waypoints[..id]
            .iter()
            .rev()
            .find_map(|w| w.position())
            .map(|prev| current.distance_to(&prev))
            .unwrap_or(0.0)
    }
}
