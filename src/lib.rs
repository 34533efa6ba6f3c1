//! ip-tracker: IP Address Geolocation Lookup
//!
//! A library and CLI tool that resolves an IP address (or the caller's own
//! public address) to approximate location, timezone and network provider,
//! renders the result as a summary card and map marker, and keeps a local
//! history of searched addresses.
//!
//! ## Features
//!
//! - Self-IP discovery and geolocation lookup over HTTP
//! - Server-rendered web page with a Leaflet map and history panel
//! - Persistent search history and display-mode flag
//! - CLI for one-off lookups and history management
//!
//! ## Quick Start
//!
//! ```rust
//! use ip_tracker::history::HistoryList;
//!
//! let mut history = HistoryList::default();
//! history.add("1.2.3.4");
//! history.add("1.2.3.4");
//! history.add("5.6.7.8");
//! assert_eq!(history.entries(), ["1.2.3.4", "5.6.7.8"]);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod history;
pub mod render;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use app::{Controller, PageState, ViewState};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{GeoClient, LocationRecord};
pub use history::HistoryList;
pub use store::Settings;
