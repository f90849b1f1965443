//! Define the clear subcommand
use super::open_session;
use crate::config::Config;
use log::info;
use std::io::{self, BufRead, Write};
use structopt::StructOpt;

/// Delete all recorded waypoints and their undo history, this cannot be undone
#[derive(Debug, StructOpt)]
pub struct ClearOpts {
    /// Skip the confirmation prompt
    #[structopt(short, long)]
    yes: bool,
}

/// Implementation of the `clear` subcommand
pub fn clear_command(config: Config, opts: ClearOpts) -> Result<(), Box<dyn std::error::Error>> {
    if !opts.yes && !confirm("Do you really wish to delete all geo data? [y/N] ")? {
        info!("Nothing was deleted");
        return Ok(());
    }
    let mut session = open_session(&config)?;
    session.clear()?;
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
