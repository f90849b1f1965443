//! Define the undo subcommand
use super::open_session;
use crate::config::Config;
use crate::Reverted;
use log::info;
use structopt::StructOpt;

/// Undo the most recent record or move, does nothing when there is no history left
#[derive(Debug, StructOpt)]
pub struct UndoOpts {}

/// Implementation of the `undo` subcommand
pub fn undo_command(config: Config, _opts: UndoOpts) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(&config)?;
    match session.undo()? {
        Some(Reverted::Moved { id, .. }) => {
            info!("Point {} returned to its previous position", id + 1)
        }
        Some(Reverted::Tombstoned { id }) => info!("Point {} was removed", id + 1),
        None => info!("Nothing to undo"),
    }
    Ok(())
}
