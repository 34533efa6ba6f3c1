//! Location summary card

use crate::geo::LocationRecord;
use crate::render::html_escape;

/// Render the five-field summary card for a record
pub fn render_card(record: &LocationRecord) -> String {
    format!(
        r#"<ul class="output-card">
  <li class="item">
    <h2>IP ADDRESS</h2>
    <p>{ip}</p>
  </li>
  <li class="item">
    <h2>LOCATION</h2>
    <p>{region}</p>
  </li>
  <li class="item">
    <h2>TIMEZONE</h2>
    <p>{timezone}</p>
  </li>
  <li class="item">
    <h2>Provider</h2>
    <p>{provider}</p>
  </li>
  <li class="item">
    <h2>Country</h2>
    <div class="country">
      <img src="{flag}" alt="">
    </div>
  </li>
</ul>"#,
        ip = html_escape(&record.ip),
        region = html_escape(&record.region),
        timezone = html_escape(&record.timezone),
        provider = html_escape(&record.provider_name),
        flag = html_escape(&record.flag_url()),
    )
}
