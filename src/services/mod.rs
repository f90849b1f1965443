//! Service module that exports interfaces to external devices, APIs, and displays

pub mod geolocation;
pub mod surface;

// rexport some traits and utilty functions
pub use geolocation::{new_geolocation_handler, GeoSource, PositionOptions};
pub use surface::{LoggingSurface, NullSurface, TrackSurface};
