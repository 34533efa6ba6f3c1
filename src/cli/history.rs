//! History command handler
//!
//! View and manage search history.

use crate::error::Result;
use crate::store::Settings;
use clap::{Args, Subcommand};

/// History command arguments
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommand>,
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List searched addresses, oldest first
    List,
    /// Remove an address
    Remove {
        /// Address to remove
        ip: String,
    },
    /// Clear all history
    Clear,
}

/// Run the history command
pub fn run(args: HistoryArgs) -> Result<()> {
    let mut settings = Settings::open_default()?;

    match args.command.unwrap_or(HistoryCommand::List) {
        HistoryCommand::List => list_history(&settings),
        HistoryCommand::Remove { ip } => remove_entry(&mut settings, &ip),
        HistoryCommand::Clear => clear_history(&mut settings),
    }
}

fn list_history(settings: &Settings) -> Result<()> {
    let history = settings.history()?;

    if history.is_empty() {
        println!("No history entries.");
        return Ok(());
    }

    for ip in history.entries() {
        println!("{}", ip);
    }
    Ok(())
}

fn remove_entry(settings: &mut Settings, ip: &str) -> Result<()> {
    let before = settings.history()?.len();
    let after = settings.remove_history(ip)?.len();

    if before == after {
        println!("Not in history: {}", ip);
    } else {
        println!("Removed {}", ip);
    }
    Ok(())
}

/// Clear all history, even when the stored list can no longer be read
pub(crate) fn clear_history(settings: &mut Settings) -> Result<()> {
    let count = settings.history().map(|history| history.len());
    settings.clear_history()?;

    match count {
        Ok(count) => println!("Cleared {} history entries.", count),
        Err(e) => println!("Cleared unreadable history ({}).", e),
    }
    Ok(())
}
