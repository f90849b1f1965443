//! Defines the general error type for the crate and various conversions into it
use std::convert;
use std::fmt;

/// General error type for the crate
#[derive(Debug)]
pub enum Error {
    Csv(csv::Error),
    EmptyTrack,
    InvalidConfigurationValue(String),
    Io(std::io::Error),
    PositionUnavailable(String),
    Rusqlite(rusqlite::Error),
    Serialization(serde_json::Error),
    UnknownExportKind(String),
    UnknownServiceHandler(String),
    UnknownWaypointId(usize),
    Yaml(serde_yaml::Error),
}

impl convert::From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}

impl convert::From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Error {
        Error::Rusqlite(err)
    }
}

impl convert::From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Serialization(err)
    }
}

impl convert::From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}

impl convert::From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Csv(e) => write!(f, "{}", e),
            Error::EmptyTrack => write!(f, "The track has no active waypoints to export"),
            Error::InvalidConfigurationValue(msg) => write!(f, "{}", msg),
            Error::Io(e) => write!(f, "{}", e),
            Error::PositionUnavailable(msg) => write!(f, "Position unavailable: {}", msg),
            Error::Rusqlite(e) => write!(f, "{}", e),
            Error::Serialization(e) => write!(f, "{}", e),
            Error::UnknownExportKind(kind) => write!(
                f,
                "Unknown export kind '{}', expected one of: points, line, polygon",
                kind
            ),
            Error::UnknownServiceHandler(msg) => write!(f, "{}", msg),
            Error::UnknownWaypointId(id) => write!(f, "Waypoint with ID={} does not exist", id),
            Error::Yaml(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}
