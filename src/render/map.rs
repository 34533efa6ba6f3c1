//! Leaflet map view
//!
//! Each render emits a brand-new map container and bootstrap script; nothing
//! is reused between renders.

use crate::config::MapConfig;
use crate::constants::api::TILE_URL_TEMPLATE;
use serde::Serialize;

/// Tile edge in pixels
const TILE_SIZE: u32 = 512;

/// Zoom offset matching the 512px tiles
const ZOOM_OFFSET: i32 = -1;

/// Everything the browser needs to draw one marker on a map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
    /// Popup text, opened immediately
    pub popup: String,
    pub tile_url: String,
    pub style_id: String,
    pub max_zoom: u8,
    pub tile_size: u32,
    pub zoom_offset: i32,
    pub access_token: String,
}

impl MapView {
    /// Centered on the given point with the style picked by `dark_mode`
    pub fn new(lat: f64, lng: f64, ip: &str, dark_mode: bool, config: &MapConfig) -> Self {
        Self {
            lat,
            lng,
            zoom: config.zoom,
            popup: ip.to_string(),
            tile_url: TILE_URL_TEMPLATE.to_string(),
            style_id: config.style_for(dark_mode).to_string(),
            max_zoom: config.max_zoom,
            tile_size: TILE_SIZE,
            zoom_offset: ZOOM_OFFSET,
            access_token: config.access_token.clone(),
        }
    }
}

/// Render the map container and the script that populates it
pub fn render_map(view: &MapView) -> String {
    // `<` is escaped so no value can close the script element
    let data = serde_json::to_string(view)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c");

    format!(
        r#"<div id="mapid"></div>
<script>
(function () {{
  var view = {data};
  var map = L.map('mapid').setView([view.lat, view.lng], view.zoom);
  L.marker([view.lat, view.lng]).addTo(map).bindPopup(view.popup).openPopup();
  L.tileLayer(view.tile_url, {{
    maxZoom: view.max_zoom,
    id: view.style_id,
    tileSize: view.tile_size,
    zoomOffset: view.zoom_offset,
    accessToken: view.access_token
  }}).addTo(map);
}})();
</script>"#,
        data = data
    )
}
