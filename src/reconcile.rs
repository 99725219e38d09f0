//! Reconciliation of model output against the known menu.
//!
//! Two strategies with deliberately different fallbacks:
//!
//! - name-based: extracts `<n>. **<name>**` list lines and keeps menu items
//!   whose title contains a candidate name. No candidates means an empty
//!   result.
//! - ID-based: parses the completion as a JSON array of menu ids. A parse
//!   failure means "recommend everything" — the caller falls back to the
//!   full menu.
//!
//! Malformed completion text is never an error here; it is logged and
//! absorbed into the fallback of the active strategy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::store::MenuItem;

/// A numbered list line with the dish name in bold: `1. **Name** - $10`.
static NUMBERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\s+\*\*(.*?)\*\*").unwrap());

/// Extract candidate dish names from completion text, lowercased and
/// trimmed, in appearance order. Lines that are not numbered-bold list
/// items contribute nothing.
pub fn extract_item_names(completion: &str) -> Vec<String> {
    completion
        .lines()
        .filter_map(|line| NUMBERED_ITEM_RE.captures(line))
        .map(|caps| caps[1].trim().to_lowercase())
        .collect()
}

/// Keep the menu items whose title contains any candidate name,
/// case-insensitively. Result order is menu order, not candidate order.
pub fn filter_menu_by_names(menu: &[MenuItem], names: &[String]) -> Vec<MenuItem> {
    menu.iter()
        .filter(|item| {
            let title = item.title.to_lowercase();
            names.iter().any(|name| title.contains(name.as_str()))
        })
        .cloned()
        .collect()
}

/// Parse a completion expected to be a JSON array of menu ids, optionally
/// wrapped in a fenced code block.
///
/// Returns `None` when the text is not valid JSON or not an array; the
/// caller treats that as "recommend the entire menu". Non-integer array
/// elements are silently skipped.
pub fn recommended_ids(completion: &str) -> Option<Vec<i64>> {
    let cleaned = strip_code_fences(completion);
    let value: Value = match serde_json::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            warn!("completion is not valid JSON, falling back to full menu: {e}");
            return None;
        }
    };
    let Some(elements) = value.as_array() else {
        warn!("completion JSON is not an array, falling back to full menu");
        return None;
    };
    Some(elements.iter().filter_map(Value::as_i64).collect())
}

/// Remove code-fence markers (```` ```json ```` and ```` ``` ````) and
/// surrounding whitespace.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
