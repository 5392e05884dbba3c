//! Plain-text extraction from post HTML.
//!
//! Post bodies arrive as rendered HTML. Structured data wants plain text, so
//! tags are dropped and their text content kept, the way a tag stripper
//! would, with entities decoded by the HTML parser.

use scraper::{Html, Node};
use tracing::trace;

/// Elements whose text never reaches a reader.
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// Strip all markup from `raw`, returning trimmed plain text.
///
/// `None` yields the empty string.
pub fn strip_html(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    // Fast path: nothing for the parser to do.
    if !raw.contains(['<', '&']) {
        return raw.trim().to_string();
    }

    let fragment = Html::parse_fragment(raw);
    let text = visible_text(&fragment);
    trace!(in_len = raw.len(), out_len = text.len(), "stripped html");
    text.trim().to_string()
}

/// Strip markup from a loosely-typed content field.
///
/// Strings are stripped; any other JSON value (numbers, arrays, null, ...)
/// yields the empty string.
pub fn strip_html_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => strip_html(Some(s)),
        _ => String::new(),
    }
}

/// Concatenate every text node that is not inside a hidden element.
fn visible_text(fragment: &Html) -> String {
    let mut out = String::new();

    for node in fragment.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(|a| a.value().as_element())
            .any(|el| HIDDEN_TAGS.contains(&el.name()));

        if !hidden {
            out.push_str(text);
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
