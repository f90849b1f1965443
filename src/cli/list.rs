//! Define the list subcommand
use super::open_session;
use crate::config::Config;
use structopt::StructOpt;

/// List the active waypoints along with the distance from the previous one
#[derive(Debug, StructOpt)]
pub struct ListOpts {}

/// Implementation of the `list` subcommand
pub fn list_command(config: Config, _opts: ListOpts) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(&config)?;

    println!("Point, Lat, Lng, Date, Time, Distance, Description");
    for row in session.table_rows() {
        println!(
            "{:>5} {:>11.6} {:>11.6} {} {} {:>16} {}",
            row.point, row.lat, row.lng, row.date, row.time, row.distance, row.description
        );
    }

    Ok(())
}
