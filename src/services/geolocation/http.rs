//! Request the current position from a JSON web endpoint, e.g. a phone or GPS receiver bridge
use super::{GeoSource, PositionOptions};
use crate::gps::{Coordinate, Sample};
use crate::Error;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use log::{debug, trace};
use reqwest::Client;
use serde::Deserialize;
use std::convert::TryFrom;
use std::time::Duration;
use waypoint_tracker_derive::FromServiceConfig;

#[derive(Debug, Deserialize)]
struct PositionResponse {
    latitude: f64,
    longitude: f64,
    /// epoch milliseconds the fix was taken at
    timestamp: Option<i64>,
}

/// Defines the connection parameters of a position endpoint
#[derive(Clone, Debug, FromServiceConfig)]
pub struct HttpLocationService {
    url: String,
    /// route requests through the system proxy settings
    proxy: bool,
}

impl HttpLocationService {
    pub fn new(url: String) -> Self {
        HttpLocationService {
            url,
            ..Self::default()
        }
    }

    fn client(&self, options: &PositionOptions) -> Result<Client, Error> {
        let mut builder = Client::builder();
        // treat zero as if a limit wasn't imposed
        if options.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(options.timeout_ms));
        }
        if !self.proxy {
            builder = builder.no_proxy();
        }
        builder
            .build()
            .map_err(|e| Error::PositionUnavailable(e.to_string()))
    }
}

impl Default for HttpLocationService {
    fn default() -> Self {
        HttpLocationService {
            url: "http://localhost:8080/position".to_string(),
            proxy: true,
        }
    }
}

#[async_trait]
impl GeoSource for HttpLocationService {
    async fn request_position(&self, options: &PositionOptions) -> Result<Sample, Error> {
        let unavailable = |e: reqwest::Error| Error::PositionUnavailable(e.to_string());
        let client = self.client(options)?;
        let requested_at = Utc::now();
        trace!("Requesting position from {}", self.url);
        let resp = client
            .get(&self.url)
            .query(&[
                ("enableHighAccuracy", options.high_accuracy.to_string()),
                ("maximumAge", options.max_age_ms.to_string()),
            ])
            .send()
            .await
            .map_err(unavailable)?;
        if !resp.status().is_success() {
            return Err(Error::PositionUnavailable(format!(
                "position request failed with code: {}",
                resp.status()
            )));
        }
        let json: PositionResponse = resp.json().await.map_err(unavailable)?;

        let now = Utc::now();
        let timestamp = match json.timestamp {
            Some(ms) => Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
                Error::PositionUnavailable(format!("invalid position timestamp: {}", ms))
            })?,
            None => now,
        };
        if options.max_age_ms == 0 {
            // a cached fix predates the request
            if timestamp.timestamp_millis() < requested_at.timestamp_millis() {
                return Err(Error::PositionUnavailable(format!(
                    "position taken at {} predates the request and no cached fix is allowed",
                    timestamp
                )));
            }
        } else {
            let age = now.signed_duration_since(timestamp).num_milliseconds();
            let max_age = i64::try_from(options.max_age_ms).unwrap_or(i64::MAX);
            if age > max_age {
                return Err(Error::PositionUnavailable(format!(
                    "position is {}ms old, exceeding the maximum age of {}ms",
                    age, options.max_age_ms
                )));
            }
        }
        debug!(
            "Received position ({}, {}) from {}",
            json.latitude, json.longitude, self.url
        );

        Ok(Sample::new(
            Coordinate::new(json.latitude, json.longitude),
            timestamp,
        ))
    }
}
