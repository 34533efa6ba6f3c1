//! ipify-backed geolocation
//!
//! Uses api.ipify.org for self-IP discovery and geo.ipify.org for lookups.
//! Every call goes to the network; there is no caching or retry.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::geo::{GeoClient, LocationRecord};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Geolocation client for the ipify services
#[derive(Debug, Clone)]
pub struct IpifyClient {
    client: reqwest::Client,
    self_ip_url: String,
    geo_url: String,
    api_key: String,
}

/// api.ipify.org response
#[derive(Debug, Deserialize)]
struct SelfIpResponse {
    ip: String,
}

/// geo.ipify.org response
#[derive(Debug, Deserialize)]
struct GeoResponse {
    ip: String,
    location: GeoLocationBody,
    #[serde(rename = "as")]
    autonomous_system: AutonomousSystemBody,
}

#[derive(Debug, Deserialize)]
struct GeoLocationBody {
    region: String,
    timezone: String,
    country: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AutonomousSystemBody {
    name: String,
}

/// Error body returned by geo.ipify.org on rejected requests
#[derive(Debug, Deserialize)]
struct ErrorBody {
    messages: Option<String>,
}

impl From<GeoResponse> for LocationRecord {
    fn from(data: GeoResponse) -> Self {
        LocationRecord {
            ip: data.ip,
            region: data.location.region,
            timezone: data.location.timezone,
            country: data.location.country,
            latitude: data.location.lat,
            longitude: data.location.lng,
            provider_name: data.autonomous_system.name,
        }
    }
}

impl IpifyClient {
    /// Create a client from API settings
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if api.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(api.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            self_ip_url: api.self_ip_url.clone(),
            geo_url: api.geo_url.clone(),
            api_key: api.geo_api_key.clone(),
        })
    }

    /// Create a client with explicit endpoints and no timeout
    pub fn with_endpoints(
        self_ip_url: impl Into<String>,
        geo_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            self_ip_url: self_ip_url.into(),
            geo_url: geo_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Describe a non-success response, preferring the service's own message
    async fn rejection(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                messages: Some(messages),
            }) => format!("{} ({})", status, messages),
            _ => status.to_string(),
        }
    }
}

impl GeoClient for IpifyClient {
    async fn discover_self_ip(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.self_ip_url)
            .query(&[("format", "json")])
            .send()
            .await
            .map_err(|e| Error::Lookup(format!("IP discovery request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Lookup(format!(
                "IP discovery returned status: {}",
                Self::rejection(response).await
            )));
        }

        let data: SelfIpResponse = response
            .json()
            .await
            .map_err(|e| Error::Lookup(format!("Failed to parse IP discovery response: {}", e)))?;

        debug!(ip = %data.ip, "discovered self IP");
        Ok(data.ip)
    }

    async fn lookup(&self, ip: &str) -> Result<LocationRecord> {
        let response = self
            .client
            .get(&self.geo_url)
            .query(&[("apiKey", self.api_key.as_str()), ("ipAddress", ip)])
            .send()
            .await
            .map_err(|e| Error::Lookup(format!("Geolocation request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Lookup(format!(
                "Geolocation API returned status: {}",
                Self::rejection(response).await
            )));
        }

        let data: GeoResponse = response
            .json()
            .await
            .map_err(|e| Error::Lookup(format!("Failed to parse geolocation response: {}", e)))?;

        Ok(data.into())
    }
}
