//! HTML rendering for the web page
//!
//! The whole page is rendered from a [`PageState`] in one pass, so the card,
//! map and error banner can never disagree about which state is shown.

pub mod card;
pub mod map;
pub mod panel;

use crate::app::{PageState, ViewState};
use crate::config::MapConfig;
use crate::history::HistoryList;

pub use card::render_card;
pub use map::{render_map, MapView};
pub use panel::render_panel;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Escape text for use in HTML content and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the full page
///
/// `map_dark` is the persisted display mode, which picks the tile style
/// independently of the page theme.
pub fn render_page(
    page: &PageState,
    history: &HistoryList,
    map_config: &MapConfig,
    map_dark: bool,
) -> String {
    let body_class = if page.dark_mode { " class=\"dark-mode\"" } else { "" };

    let (output, map) = match &page.view {
        ViewState::Result(record) => {
            let view = MapView::new(record.latitude, record.longitude, &record.ip, map_dark, map_config);
            (
                format!("<section id=\"output\">{}</section>", render_card(record)),
                format!("<section id=\"map\">{}</section>", render_map(&view)),
            )
        }
        ViewState::Empty | ViewState::Error(_) => (String::new(), String::new()),
    };

    let (banner_hidden, banner_text) = match page.banner() {
        Some(message) => ("", html_escape(message)),
        None => (" hidden", String::new()),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>IP Address Tracker</title>
  <link rel="stylesheet" href="{leaflet_css}">
  <link rel="stylesheet" href="/static/style.css">
  <script src="{leaflet_js}"></script>
</head>
<body{body_class}>
  <header>
    <h1>IP Address Tracker</h1>
    <form id="search-form" method="post" action="/search">
      <input id="input" name="ip" type="text" value="{input}" autocomplete="off"
        oninput="document.getElementById('error-container').hidden = true; fetch('/input', {{ method: 'POST', body: new URLSearchParams({{ ip: this.value }}) }});">
      <button id="search-btn" type="submit">Search</button>
    </form>
    <form method="post" action="/dark-mode">
      <button id="toggle-dark-mode" type="submit">Toggle dark mode</button>
    </form>
  </header>
  <div id="error-container"{banner_hidden}>
    <p id="error-message">{banner_text}</p>
  </div>
  <main>
    {output}
    {map}
  </main>
  <aside id="history">
    <h2>History</h2>
    {panel}
    <form method="post" action="/history/clear">
      <button id="clear-history-btn" type="submit">Clear history</button>
    </form>
  </aside>
</body>
</html>
"#,
        leaflet_css = LEAFLET_CSS,
        leaflet_js = LEAFLET_JS,
        body_class = body_class,
        input = html_escape(&page.input),
        banner_hidden = banner_hidden,
        banner_text = banner_text,
        output = output,
        map = map,
        panel = render_panel(history),
    )
}
