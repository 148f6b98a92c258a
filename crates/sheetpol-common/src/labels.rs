//! Label string parsing
//!
//! Spreadsheet cells describe endpoints as `key:value` pairs separated by
//! commas or line breaks, e.g. `app:web, tier:frontend`. This module turns
//! such text into an insertion-ordered label map.

use indexmap::IndexMap;

/// Insertion-ordered label map, rendered in the order labels were authored
pub type Labels = IndexMap<String, String>;

/// Parse a `k1:v1,k2:v2` (or newline separated) string into labels.
///
/// Segments are trimmed and split on the first colon only. Segments without a
/// colon are dropped. A repeated key keeps its first position and takes the
/// last value. Empty input yields an empty map.
pub fn parse_labels(raw: &str) -> Labels {
    let mut labels = Labels::new();
    for segment in raw.split([',', '\n']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some((key, value)) = segment.split_once(':') {
            labels.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    labels
}

/// Render labels back to the comma separated `key:value` form
pub fn format_labels(labels: &Labels) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}
