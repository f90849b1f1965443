//! A position source that always reports the same configured coordinate
use super::{GeoSource, PositionOptions};
use crate::gps::{Coordinate, Sample};
use crate::Error;
use async_trait::async_trait;
use chrono::Utc;
use waypoint_tracker_derive::FromServiceConfig;

/// Reports a fixed latitude and longitude, useful for manual entry and surveying known marks
#[derive(Clone, Debug, Default, FromServiceConfig)]
pub struct FixedLocation {
    latitude: f64,
    longitude: f64,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        FixedLocation {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

#[async_trait]
impl GeoSource for FixedLocation {
    async fn request_position(&self, _options: &PositionOptions) -> Result<Sample, Error> {
        Ok(Sample::new(
            Coordinate::new(self.latitude, self.longitude),
            Utc::now(),
        ))
    }
}
