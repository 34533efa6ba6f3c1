//! Server shared state
//!
//! Holds configuration and the page controller for the HTTP server.

use crate::app::Controller;
use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_geo_client, IpifyClient};
use crate::render::render_page;
use crate::store::Settings;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Page state, history and display mode
    pub controller: Controller<IpifyClient>,
}

impl AppState {
    /// Create state backed by the configured services and the default store
    pub fn new(config: Config) -> Result<Self> {
        let client = get_geo_client(&config)?;
        let settings = Settings::open_default()?;
        Ok(Self::with_parts(config, client, settings))
    }

    /// Create state from explicit parts
    pub fn with_parts(config: Config, client: IpifyClient, settings: Settings) -> Self {
        let controller = Controller::new(client, settings)
            .with_dark_mode_reset(config.display.reset_dark_mode_on_load);
        Self { config, controller }
    }

    /// Render the page for the current state
    pub async fn render(&self) -> Result<String> {
        let page = self.controller.page().await;
        let history = self.controller.history().await?;
        let map_dark = self.controller.map_dark_mode().await?;
        Ok(render_page(&page, &history, &self.config.map, map_dark))
    }
}
