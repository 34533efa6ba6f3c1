//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/ip-tracker/config.toml

pub mod defaults;

use crate::constants::api::{GEO_URL, SELF_IP_URL};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lookup service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Map tile settings
    #[serde(default)]
    pub map: MapConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Page behavior settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Lookup service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// IP-echo endpoint
    #[serde(default = "default_self_ip_url")]
    pub self_ip_url: String,

    /// Geolocation endpoint
    #[serde(default = "default_geo_url")]
    pub geo_url: String,

    /// Geolocation API key (sent as `apiKey`)
    #[serde(default)]
    pub geo_api_key: String,

    /// Request timeout in seconds, 0 for none
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Map tile settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Tile provider access token
    #[serde(default)]
    pub access_token: String,

    /// Style id used in light mode
    #[serde(default = "default_light_style")]
    pub light_style: String,

    /// Style id used in dark mode
    #[serde(default = "default_dark_style")]
    pub dark_style: String,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Maximum zoom level
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Page behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Force the persisted dark-mode flag back to false on every page load
    #[serde(default = "default_reset_dark_mode")]
    pub reset_dark_mode_on_load: bool,
}

// Default value functions for serde
fn default_self_ip_url() -> String {
    SELF_IP_URL.to_string()
}
fn default_geo_url() -> String {
    GEO_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_light_style() -> String {
    DEFAULT_LIGHT_STYLE.to_string()
}
fn default_dark_style() -> String {
    DEFAULT_DARK_STYLE.to_string()
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_max_zoom() -> u8 {
    DEFAULT_MAX_ZOOM
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_reset_dark_mode() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            self_ip_url: default_self_ip_url(),
            geo_url: default_geo_url(),
            geo_api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            light_style: default_light_style(),
            dark_style: default_dark_style(),
            zoom: default_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reset_dark_mode_on_load: default_reset_dark_mode(),
        }
    }
}

impl MapConfig {
    /// Tile style id for the given display mode
    pub fn style_for(&self, dark_mode: bool) -> &str {
        if dark_mode {
            &self.dark_style
        } else {
            &self.light_style
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "self_ip_url"] => Some(self.api.self_ip_url.clone()),
            ["api", "geo_url"] => Some(self.api.geo_url.clone()),
            ["api", "geo_api_key"] => Some(self.api.geo_api_key.clone()),
            ["api", "timeout_secs"] => Some(self.api.timeout_secs.to_string()),

            ["map", "access_token"] => Some(self.map.access_token.clone()),
            ["map", "light_style"] => Some(self.map.light_style.clone()),
            ["map", "dark_style"] => Some(self.map.dark_style.clone()),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "max_zoom"] => Some(self.map.max_zoom.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["display", "reset_dark_mode_on_load"] => {
                Some(self.display.reset_dark_mode_on_load.to_string())
            }

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "self_ip_url"] => self.api.self_ip_url = value.to_string(),
            ["api", "geo_url"] => self.api.geo_url = value.to_string(),
            ["api", "geo_api_key"] => self.api.geo_api_key = value.to_string(),
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }

            ["map", "access_token"] => self.map.access_token = value.to_string(),
            ["map", "light_style"] => self.map.light_style = value.to_string(),
            ["map", "dark_style"] => self.map.dark_style = value.to_string(),
            ["map", "zoom"] => {
                self.map.zoom = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid zoom value: {}", value)))?;
            }
            ["map", "max_zoom"] => {
                self.map.max_zoom = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid zoom value: {}", value)))?;
            }

            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["display", "reset_dark_mode_on_load"] => {
                self.display.reset_dark_mode_on_load = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.self_ip_url",
            "api.geo_url",
            "api.geo_api_key",
            "api.timeout_secs",
            "map.access_token",
            "map.light_style",
            "map.dark_style",
            "map.zoom",
            "map.max_zoom",
            "server.host",
            "server.port",
            "display.reset_dark_mode_on_load",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
