//! Command handlers.

pub mod audit;
pub mod inventory;
mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Inventory(args) => inventory::handle(args, global).await,
        Command::Audit(args) => audit::handle(args, global).await,
    }
}
