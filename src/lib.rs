//! Record geolocated waypoints during a walk, undo mistaken edits, and export the resulting
//! track as GeoJSON or CSV.
pub mod cli;
pub mod config;
mod error;
pub mod export;
pub mod gps;
pub mod persistence;
pub mod services;
mod session;
pub mod track;

pub use error::Error;
pub use export::ExportKind;
pub use gps::{distance, Coordinate, Sample};
pub use persistence::{PersistenceAdapter, SlotStore, SqliteSlotStore};
pub use session::Session;
pub use track::{Reverted, Waypoint, WaypointId, WaypointStore};
