use log::error;
use simplelog::{Config as LogConfig, TermLogger, TerminalMode};
use structopt::StructOpt;
use waypoint_tracker::cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Cli::from_args();
    let config = opt.load_config()?;
    let level_filter = opt.verbosity(config.log_level());
    TermLogger::init(level_filter, LogConfig::default(), TerminalMode::Mixed)?;

    // surface failures through the logger before bailing out with a non-zero exit code
    if let Err(e) = opt.execute_subcommand(config) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
