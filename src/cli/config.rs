//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "api.geo_api_key")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => show_all_config(&config),

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

fn secret(value: &str) -> &'static str {
    if value.is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[api]");
    println!("self_ip_url = \"{}\"", config.api.self_ip_url);
    println!("geo_url = \"{}\"", config.api.geo_url);
    println!("geo_api_key = {}", secret(&config.api.geo_api_key));
    println!("timeout_secs = {}", config.api.timeout_secs);
    println!();

    println!("[map]");
    println!("access_token = {}", secret(&config.map.access_token));
    println!("light_style = \"{}\"", config.map.light_style);
    println!("dark_style = \"{}\"", config.map.dark_style);
    println!("zoom = {}", config.map.zoom);
    println!("max_zoom = {}", config.map.max_zoom);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[display]");
    println!(
        "reset_dark_mode_on_load = {}",
        config.display.reset_dark_mode_on_load
    );
}
