//! Request path inspection.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Extract the discussion id from a request path such as `/d/123-my-title`.
///
/// Query string and fragment are ignored. Returns `None` for anything that is
/// not a discussion page, including ids that overflow `u64`.
pub fn discussion_id_from_path(path: &str) -> Option<u64> {
    static DISCUSSION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"/d/(\d+)").expect("valid regex"));

    let path = path.split(['?', '#']).next().unwrap_or(path);
    let caps = DISCUSSION_RE.captures(path)?;

    match caps[1].parse() {
        Ok(id) => Some(id),
        Err(e) => {
            debug!(path, error = %e, "discussion id out of range");
            None
        }
    }
}
