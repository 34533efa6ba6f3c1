//! Lookup command handler
//!
//! Resolves one address and prints it.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::{get_geo_client, GeoClient};
use crate::store::Settings;
use clap::Args;

/// Lookup command arguments
#[derive(Args)]
pub struct LookupArgs {
    /// IP address to look up; omitted means your public address
    pub ip: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Don't save to history
    #[arg(long)]
    pub no_history: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the lookup command
pub async fn run(args: LookupArgs) -> Result<()> {
    if args.list_formats {
        println!("Available output formats:");
        for format in available_formats() {
            println!("  {:5} - {}", format.name, format.description);
        }
        return Ok(());
    }

    let config = Config::load()?;
    let format = args.format.unwrap_or_else(|| "text".to_string());
    let formatter =
        get_formatter(&format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let client = get_geo_client(&config)?;
    let ip = match args.ip {
        Some(ip) => ip,
        None => {
            let ip = client.discover_self_ip().await?;
            eprintln!("Using your public address: {}", ip);
            ip
        }
    };

    let record = client.lookup(&ip).await?;

    if !args.no_history {
        Settings::open_default()?.add_history(&ip)?;
    }

    println!("{}", formatter.format(&record)?);
    Ok(())
}
