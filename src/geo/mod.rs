//! Geolocation module
//!
//! Self-IP discovery and IP-to-location lookup.

pub mod ipify;

use crate::config::Config;
use crate::constants::api::FLAG_URL_TEMPLATE;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use ipify::IpifyClient;

/// A resolved IP location
///
/// Produced by a lookup and discarded after rendering; only the searched
/// address outlives it (in history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Address as reported by the lookup service
    pub ip: String,
    /// Region or state name
    pub region: String,
    /// UTC offset, e.g. "-08:00"
    pub timezone: String,
    /// Two-letter country code
    pub country: String,
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// Network provider (autonomous system name)
    pub provider_name: String,
}

impl LocationRecord {
    /// Flag image URL for the record's country
    ///
    /// The code is only lower-cased; an unexpected code yields a broken
    /// image reference rather than an error.
    pub fn flag_url(&self) -> String {
        FLAG_URL_TEMPLATE.replace("{code}", &self.country.to_lowercase())
    }
}

/// Trait for geolocation backends
pub trait GeoClient: Send + Sync {
    /// Discover the caller's public IP address
    fn discover_self_ip(&self) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Resolve an address to a location record
    ///
    /// The address is passed through unvalidated; malformed input is left
    /// to the remote service to reject.
    fn lookup(&self, ip: &str) -> impl std::future::Future<Output = Result<LocationRecord>> + Send;
}

/// Get the default geolocation client for a config
pub fn get_geo_client(config: &Config) -> Result<IpifyClient> {
    IpifyClient::new(&config.api)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str) -> LocationRecord {
        LocationRecord {
            ip: "8.8.8.8".to_string(),
            region: "California".to_string(),
            timezone: "-08:00".to_string(),
            country: country.to_string(),
            latitude: 37.4,
            longitude: -122.1,
            provider_name: "Google".to_string(),
        }
    }

    #[test]
    fn test_flag_url_lowercases_country() {
        assert_eq!(record("US").flag_url(), "https://flagcdn.com/w640/us.png");
    }

    #[test]
    fn test_flag_url_passes_malformed_code_through() {
        assert_eq!(record("XYZ").flag_url(), "https://flagcdn.com/w640/xyz.png");
        assert_eq!(record("").flag_url(), "https://flagcdn.com/w640/.png");
    }

    #[test]
    fn test_get_geo_client() {
        assert!(get_geo_client(&Config::default()).is_ok());
    }
}
