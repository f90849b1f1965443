//! Module with GPS specific structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean radius of the earth in kilometers
static EARTH_RADIUS_KM: f64 = 6371.0;

/// Stores a single geospatial point, serialized as a `[lat, lng]` pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// latitude coordinate in degrees
    latitude: f64,
    /// longitude coordinate in degrees
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from a latitude and longitude in degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Return latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Return longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Return the pair in GeoJSON axis order, `[longitude, latitude]`
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Great-circle distance to another coordinate in meters
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(self, other)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Coordinate::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.latitude, coord.longitude]
    }
}

/// A single position reading produced by a geolocation source
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    coordinate: Coordinate,
    timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Sample {
            coordinate,
            timestamp,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Compute the great-circle distance between two coordinates in meters using the haversine
/// formula. The arc is computed in kilometers and converted at the end.
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // rounding can push antipodal points just past 1
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}
