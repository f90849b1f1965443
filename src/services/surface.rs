//! Display surfaces that mirror the track, e.g. markers and a path line on a map
use crate::gps::Coordinate;
use crate::track::WaypointId;
use log::{debug, info};

/// trait that defines the calls a display receives as the track changes
pub trait TrackSurface {
    /// Show a marker for a newly active waypoint
    fn place_marker(&mut self, id: WaypointId, position: Coordinate);
    /// Move the existing marker of a waypoint
    fn move_marker(&mut self, id: WaypointId, position: Coordinate);
    /// Detach the marker of a waypoint that is no longer active
    fn remove_marker(&mut self, id: WaypointId);
    /// Replace the path line with the given coordinates
    fn draw_path(&mut self, path: &[Coordinate]);
}

/// Reports surface updates through the logger
#[derive(Debug, Default)]
pub struct LoggingSurface;

impl TrackSurface for LoggingSurface {
    fn place_marker(&mut self, id: WaypointId, position: Coordinate) {
        info!(
            "Point {} placed at ({:.6}, {:.6})",
            id + 1,
            position.latitude(),
            position.longitude()
        );
    }

    fn move_marker(&mut self, id: WaypointId, position: Coordinate) {
        info!(
            "Point {} moved to ({:.6}, {:.6})",
            id + 1,
            position.latitude(),
            position.longitude()
        );
    }

    fn remove_marker(&mut self, id: WaypointId) {
        info!("Point {} removed", id + 1);
    }

    fn draw_path(&mut self, path: &[Coordinate]) {
        debug!("Path redrawn through {} points", path.len());
    }
}

/// Ignores every update
#[derive(Debug, Default)]
pub struct NullSurface;

impl TrackSurface for NullSurface {
    fn place_marker(&mut self, _id: WaypointId, _position: Coordinate) {}

    fn move_marker(&mut self, _id: WaypointId, _position: Coordinate) {}

    fn remove_marker(&mut self, _id: WaypointId) {}

    fn draw_path(&mut self, _path: &[Coordinate]) {}
}
