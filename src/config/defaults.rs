//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default request timeout in seconds (0 disables the timeout)
pub const DEFAULT_TIMEOUT_SECS: u64 = 0;

/// Light map tile style
pub const DEFAULT_LIGHT_STYLE: &str = "mapbox/streets-v11";

/// Dark map tile style
pub const DEFAULT_DARK_STYLE: &str = "mapbox/dark-v10";

/// Initial map zoom level
pub const DEFAULT_ZOOM: u8 = 13;

/// Maximum zoom offered by the tile layer
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "ip-tracker";
