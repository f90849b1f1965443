//! Serialize a track into GeoJSON documents or a flat table for CSV output
use crate::Error;
use std::fmt;
use std::str::FromStr;

pub mod geojson;
pub mod table;

pub use self::geojson::{export_geojson, GeoJson};
pub use self::table::{table_rows, write_csv, TableRow};

/// Description used for waypoints and shapes without one
pub static UNDESCRIPTED: &str = "Undescripted";

/// Shape of the GeoJSON document to produce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    /// A feature collection with one point per waypoint
    Points,
    /// A single line string following the track
    Line,
    /// A single polygon closing the track back onto its first waypoint
    Polygon,
}

impl FromStr for ExportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "points" => Ok(ExportKind::Points),
            "line" => Ok(ExportKind::Line),
            "polygon" => Ok(ExportKind::Polygon),
            _ => Err(Error::UnknownExportKind(s.to_string())),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::Points => "points",
            ExportKind::Line => "line",
            ExportKind::Polygon => "polygon",
        };
        write!(f, "{}", name)
    }
}
