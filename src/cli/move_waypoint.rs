//! Define the move subcommand
use super::{open_session, parse_point};
use crate::config::Config;
use crate::gps::Coordinate;
use crate::WaypointId;
use structopt::clap::AppSettings;
use structopt::StructOpt;

/// Move a waypoint to a corrected position, the previous position is kept for undo
#[derive(Debug, PartialEq, StructOpt)]
#[structopt(setting = AppSettings::AllowNegativeNumbers)]
pub struct MoveOpts {
    /// Point number of the waypoint as shown by the list command
    #[structopt(name = "POINT", parse(try_from_str = parse_point))]
    id: WaypointId,
    /// New latitude in degrees
    #[structopt(name = "LAT")]
    lat: f64,
    /// New longitude in degrees
    #[structopt(name = "LNG")]
    lng: f64,
}

/// Implementation of the `move` subcommand
pub fn move_command(config: Config, opts: MoveOpts) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&config)?;
    session.move_waypoint(opts.id, Coordinate::new(opts.lat, opts.lng))?;
    Ok(())
}
