//! History panel
//!
//! One row per entry. The row link searches that address; the delete button
//! is a separate form beside the link, so deleting never triggers a search.

use crate::history::HistoryList;
use crate::render::html_escape;

/// Render the history list
pub fn render_panel(history: &HistoryList) -> String {
    let rows: String = history
        .entries()
        .iter()
        .map(|ip| render_row(ip))
        .collect();

    format!("<ul class=\"history-list\">{}</ul>", rows)
}

fn render_row(ip: &str) -> String {
    let text = html_escape(ip);
    format!(
        r#"
      <li class="history-list-item">
        <a class="history-search" href="/history/select?ip={query}">{text}</a>
        <form class="history-delete" method="post" action="/history/remove">
          <input type="hidden" name="ip" value="{text}">
          <button class="delete-icon" type="submit" title="Remove {text}">&times;</button>
        </form>
      </li>"#,
        query = html_escape(&urlencoding::encode(ip)),
        text = text,
    )
}
