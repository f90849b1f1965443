//! Define the application's command line interface
use crate::config::Config;
use crate::persistence::{PersistenceAdapter, SqliteSlotStore};
use crate::services::LoggingSurface;
use crate::{Error, Session, WaypointId};
use simplelog::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

mod clear;
use clear::{clear_command, ClearOpts};
mod describe;
use describe::{describe_command, DescribeOpts};
mod export;
use export::{export_command, export_csv_command, ExportCsvOpts, ExportOpts};
mod list;
use list::{list_command, ListOpts};
mod move_waypoint;
use move_waypoint::{move_command, MoveOpts};
mod record;
use record::{record_command, RecordOpts};
mod undo;
use undo::{undo_command, UndoOpts};

/// The session type every command operates on
pub type CliSession = Session<SqliteSlotStore, LoggingSurface>;

/// Record, correct and export geolocated waypoints
#[derive(Debug, StructOpt)]
pub struct Cli {
    /// Set logging level to debug, use a second time (e.g. -vv) to set logging to trace
    #[structopt(short, long, parse(from_occurrences))]
    verbose: i32,
    /// Suppress info logging messages use a second time (e.g. -qq) to hide warnings
    #[structopt(short, long, parse(from_occurrences))]
    quiet: i32,
    /// Configuration file to use instead of the default location
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Command,
}

impl Cli {
    /// Return the verbose flag counts as a log level filter
    pub fn verbosity(&self, default: LevelFilter) -> LevelFilter {
        if self.quiet == 1 {
            LevelFilter::Warn
        } else if self.quiet > 1 {
            LevelFilter::Error
        } else if self.verbose == 1 {
            LevelFilter::Debug
        } else if self.verbose > 1 {
            LevelFilter::Trace
        } else {
            default
        }
    }

    /// Read the configuration file, a missing file at the default location yields the defaults
    pub fn load_config(&self) -> Result<Config, Error> {
        match &self.config {
            Some(path) => Config::load(&mut File::open(path)?),
            None => {
                let path = Config::default_path();
                if path.exists() {
                    Config::load(&mut File::open(&path)?)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Consume options struct and return the result of subcommand execution
    pub fn execute_subcommand(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        self.cmd.execute(config)
    }
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Erase every recorded waypoint
    #[structopt(name = "clear")]
    Clear(ClearOpts),
    /// Set the description of a waypoint
    #[structopt(name = "describe")]
    Describe(DescribeOpts),
    /// Export the track as GeoJSON
    #[structopt(name = "export")]
    Export(ExportOpts),
    /// Export the waypoint table as CSV
    #[structopt(name = "export-csv")]
    ExportCsv(ExportCsvOpts),
    /// List the active waypoints
    #[structopt(name = "list")]
    List(ListOpts),
    /// Move a waypoint to a corrected position
    #[structopt(name = "move")]
    Move(MoveOpts),
    /// Record a new waypoint at the current position
    #[structopt(name = "record")]
    Record(RecordOpts),
    /// Undo the most recent record or move
    #[structopt(name = "undo")]
    Undo(UndoOpts),
}

impl Command {
    /// Consume enum variant and return the result of the command's execution
    fn execute(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Command::Clear(opts) => clear_command(config, opts),
            Command::Describe(opts) => describe_command(config, opts),
            Command::Export(opts) => export_command(config, opts),
            Command::ExportCsv(opts) => export_csv_command(config, opts),
            Command::List(opts) => list_command(config, opts),
            Command::Move(opts) => move_command(config, opts),
            Command::Record(opts) => record_command(config, opts),
            Command::Undo(opts) => undo_command(config, opts),
        }
    }
}

/// Open the persisted track from the configured database
fn open_session(config: &Config) -> Result<CliSession, Error> {
    let slots = SqliteSlotStore::open(config.database_path())?;
    Session::open(PersistenceAdapter::new(slots), LoggingSurface)
}

/// Convert a one based point number, as shown by the list command, into a waypoint id
fn parse_point(src: &str) -> Result<WaypointId, String> {
    match src.parse::<usize>() {
        Ok(point) if point > 0 => Ok(point - 1),
        _ => Err(format!("invalid point number '{}', expected 1 or more", src)),
    }
}

/// Return a writer for the output path, "-" or no path at all writes to stdout
fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    match output {
        Some(path) if path != Path::new("-") => Ok(Box::new(File::create(path)?)),
        _ => Ok(Box::new(io::stdout())),
    }
}
