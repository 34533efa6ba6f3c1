//! ip-tracker CLI entry point
//!
//! IP geolocation lookup - CLI + web app

use ip_tracker::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
