//! Derive the drawable path from the current state of a store
use super::WaypointStore;
use crate::gps::Coordinate;
use crate::Error;

/// Current position of every active waypoint in ascending id order
pub fn current_path(store: &WaypointStore) -> Vec<Coordinate> {
    store
        .active_waypoints()
        .filter_map(|w| w.position())
        .collect()
}

/// The current path with its first coordinate repeated at the end to close the ring
pub fn closed_path(store: &WaypointStore) -> Result<Vec<Coordinate>, Error> {
    let mut path = current_path(store);
    let first = *path.first().ok_or(Error::EmptyTrack)?;
    path.push(first);
    Ok(path)
}
