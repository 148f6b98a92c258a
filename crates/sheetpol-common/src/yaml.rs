//! Multi-document YAML rendering
//!
//! Documents are serialized one by one with serde_yaml and joined with `---`
//! separators, so key order follows struct field order.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const DOCUMENT_SEPARATOR: &str = "---\n";

/// Render a sequence of documents as one YAML stream.
///
/// Empty input renders as an empty string.
pub fn render_documents<T: Serialize>(docs: &[T]) -> Result<String> {
    let rendered = docs
        .iter()
        .map(serde_yaml::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rendered.join(DOCUMENT_SEPARATOR))
}

/// Parse a multi-document YAML string into one value per document.
pub fn parse_documents(input: &str) -> Result<Vec<serde_yaml::Value>> {
    serde_yaml::Deserializer::from_str(input)
        .map(|doc| serde_yaml::Value::deserialize(doc).map_err(Error::from))
        .collect()
}
