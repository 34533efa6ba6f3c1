//! Centralized constants for the ip-tracker crate
//!
//! Endpoints, storage keys and user-facing messages shared across modules.

/// External API endpoints
pub mod api {
    /// IP-echo service returning the caller's public address
    pub const SELF_IP_URL: &str = "https://api.ipify.org";

    /// IP geolocation service (requires an API key)
    pub const GEO_URL: &str = "https://geo.ipify.org/api/v1";

    /// Country flag image host; `{code}` is the lower-cased country code
    pub const FLAG_URL_TEMPLATE: &str = "https://flagcdn.com/w640/{code}.png";

    /// Map tile template understood by Leaflet's `L.tileLayer`
    pub const TILE_URL_TEMPLATE: &str =
        "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";
}

/// Keys of the persisted key-value store
pub mod storage {
    /// JSON array of previously searched addresses
    pub const HISTORY_KEY: &str = "ipHistory";

    /// JSON boolean display-mode flag
    pub const DARK_MODE_KEY: &str = "darkMode";

    /// Store file name inside the data directory
    pub const STORE_FILE_NAME: &str = "store.json";
}

/// Messages shown in the error banner
pub mod messages {
    pub const SELF_IP_FAILED: &str = "Failed to fetch IP information.";
    pub const LOOKUP_FAILED: &str = "Failed to fetch geolocation information.";
}
