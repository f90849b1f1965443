//! Define the export and export-csv subcommands
use super::{open_session, output_writer};
use crate::config::Config;
use crate::export::write_csv;
use crate::ExportKind;
use log::info;
use std::io::Write;
use std::path::PathBuf;
use structopt::StructOpt;

/// Export the track as a GeoJSON document
#[derive(Debug, StructOpt)]
pub struct ExportOpts {
    /// Shape of the export: points, line or polygon
    #[structopt(name = "KIND")]
    kind: ExportKind,
    /// Description attached to a line or polygon
    #[structopt(short, long)]
    desc: Option<String>,
    /// name of file to output GeoJSON to, if not provided or "-" is used data is written to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

/// Implementation of the `export` subcommand
pub fn export_command(config: Config, opts: ExportOpts) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(&config)?;
    let document = session
        .export_geojson(opts.kind, opts.desc.as_deref())?
        .to_json()?;

    let mut writer = output_writer(opts.output.as_deref())?;
    writeln!(writer, "{}", document)?;
    writer.flush()?;
    info!("Exported track as GeoJSON {}", opts.kind);

    Ok(())
}

/// Export the waypoint table as CSV
#[derive(Debug, StructOpt)]
pub struct ExportCsvOpts {
    /// Leave out the header row
    #[structopt(long)]
    no_headers: bool,
    /// name of file to output CSV data to, if not provided or "-" is used data is written to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

/// Implementation of the `export-csv` subcommand
pub fn export_csv_command(
    config: Config,
    opts: ExportCsvOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(&config)?;
    let rows = session.table_rows();
    let writer = output_writer(opts.output.as_deref())?;
    write_csv(&rows, writer, !opts.no_headers)?;
    info!("Exported {} waypoints as CSV", rows.len());

    Ok(())
}
