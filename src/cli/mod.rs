//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod history;
pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};

/// IP address geolocation lookup
#[derive(Parser)]
#[command(name = "ip-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up an IP address (default: your own)
    Lookup(lookup::LookupArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// View and manage search history
    History(history::HistoryArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup(args) => lookup::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::History(args) => history::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from(["ip-tracker", "lookup", "8.8.8.8", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Lookup(args) => {
                assert_eq!(args.ip.as_deref(), Some("8.8.8.8"));
                assert_eq!(args.format.as_deref(), Some("json"));
                assert!(!args.no_history);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_parse_history_remove() {
        let cli = Cli::try_parse_from(["ip-tracker", "history", "remove", "1.2.3.4"]).unwrap();
        match cli.command {
            Commands::History(args) => match args.command {
                Some(history::HistoryCommand::Remove { ip }) => assert_eq!(ip, "1.2.3.4"),
                _ => panic!("expected remove"),
            },
            _ => panic!("expected history"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["ip-tracker", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("expected serve"),
        }
    }
}
