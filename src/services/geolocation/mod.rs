//! Acquire the current position of the user from a positioning source
use crate::config::{FromServiceConfig, ServiceConfig};
use crate::gps::Sample;
use crate::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod fixed;
pub use fixed::FixedLocation;
mod http;
pub use http::HttpLocationService;

/// Options passed along with each position request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    /// ask the source for its most accurate fix even if it is slower
    pub high_accuracy: bool,
    /// give up on the request after this many milliseconds, zero disables the limit
    pub timeout_ms: u64,
    /// oldest acceptable cached position in milliseconds, zero rejects any fix taken before the
    /// request was sent
    pub max_age_ms: u64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions {
            high_accuracy: true,
            timeout_ms: 5000,
            max_age_ms: 0,
        }
    }
}

/// trait that defines how a single position sample is requested
#[async_trait]
pub trait GeoSource: Send + Sync {
    /// Resolve once with the current position or fail with `Error::PositionUnavailable`
    async fn request_position(&self, options: &PositionOptions) -> Result<Sample, Error>;
}

pub fn new_geolocation_handler(config: &ServiceConfig) -> Result<Box<dyn GeoSource>, Error> {
    match config.handler() {
        "http" => Ok(Box::new(HttpLocationService::from_config(config)?)),
        "fixed" => Ok(Box::new(FixedLocation::from_config(config)?)),
        _ => Err(Error::UnknownServiceHandler(format!(
            "no geolocation handler exists for: {}",
            config.handler()
        ))),
    }
}
