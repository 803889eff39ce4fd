//! Log entry → HTML fragment rendering.

use crate::config::MarkupPolicy;
use crate::log::{EntryKind, LogEntry};

fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Render one entry as a `<div>` fragment for appending to the output
/// container.
///
/// Echo and error text is always escaped. Reply text follows `policy`.
#[must_use]
pub fn render_entry(entry: &LogEntry, policy: MarkupPolicy) -> String {
    let body = match (entry.kind, policy) {
        (EntryKind::Reply, MarkupPolicy::Raw) => entry.text.clone(),
        _ => html_escape(&entry.text),
    };
    format!(
        "<div class=\"cmdterm-{}\">{}</div>",
        entry.kind.as_str(),
        body
    )
}
