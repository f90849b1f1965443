//! Define the describe subcommand
use super::{open_session, parse_point};
use crate::config::Config;
use crate::WaypointId;
use structopt::StructOpt;

/// Attach a description to a waypoint, replacing any previous one
#[derive(Debug, StructOpt)]
pub struct DescribeOpts {
    /// Point number of the waypoint as shown by the list command
    #[structopt(name = "POINT", parse(try_from_str = parse_point))]
    id: WaypointId,
    /// Description text
    #[structopt(name = "TEXT")]
    text: String,
}

/// Implementation of the `describe` subcommand
pub fn describe_command(
    config: Config,
    opts: DescribeOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&config)?;
    session.describe(opts.id, opts.text)?;
    Ok(())
}
