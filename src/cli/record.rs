//! Define the record subcommand
use super::open_session;
use crate::config::Config;
use crate::gps::Coordinate;
use chrono::Utc;
use log::info;
use structopt::StructOpt;

/// Record a new waypoint from the configured geolocation service or an explicit coordinate
#[derive(Debug, StructOpt)]
pub struct RecordOpts {
    /// Latitude in degrees to record instead of asking the geolocation service
    #[structopt(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,
    /// Longitude in degrees to record instead of asking the geolocation service
    #[structopt(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
}

/// Implementation of the `record` subcommand
pub fn record_command(config: Config, opts: RecordOpts) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&config)?;
    let id = match (opts.lat, opts.lng) {
        (Some(lat), Some(lng)) => session.record_at(Coordinate::new(lat, lng), Utc::now())?,
        _ => {
            let source = config.get_geolocation_handler()?;
            // the position request is the only asynchronous step, a single threaded runtime
            // is enough to drive it
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(session.record(source.as_ref(), &config.position_options()))?
        }
    };
    info!("Recorded point {}", id + 1);

    Ok(())
}
