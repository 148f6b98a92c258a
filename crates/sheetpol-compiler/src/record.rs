//! Rule records and grouping keys

use std::fmt;

use sheetpol_common::Labels;

/// Source text that marks a row as applying to every pod in the namespace.
///
/// Rows with an empty source column fall into the same group.
pub const ALL_PODS_KEYWORD: &str = "все поды в namespace";

/// Traffic direction of a rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Ingress,
    Egress,
}

impl Direction {
    /// Interpret a direction cell. Only `ingress` (any case) is ingress;
    /// everything else renders as egress.
    pub fn from_cell(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("ingress") {
            Direction::Ingress
        } else {
            Direction::Egress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ingress => "ingress",
            Direction::Egress => "egress",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One access rule, taken from a spreadsheet row or from the baseline table
#[derive(Clone, Debug, PartialEq)]
pub struct RuleRecord {
    /// Protocol name; `ANY` (any case) means no protocol restriction
    pub protocol: String,
    /// Peer text for ingress rules
    pub source: String,
    /// Traffic direction
    pub direction: Direction,
    /// Peer text for egress rules
    pub destination: String,
    /// Port number or name, kept as text
    pub port: String,
    /// Explicit peer labels; bypass classification of source/destination
    pub labels: Option<Labels>,
    /// Opaque rules block copied into the output verbatim
    pub rules: Option<serde_yaml::Value>,
}

impl RuleRecord {
    /// Peer text for this record's direction
    pub fn peer_text(&self) -> &str {
        match self.direction {
            Direction::Ingress => &self.source,
            Direction::Egress => &self.destination,
        }
    }
}

/// Key that rows are grouped by
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Every pod in the namespace
    AllPods,
    /// Trimmed source column text, parsed as labels when rendering
    Source(String),
}

impl GroupKey {
    /// Group key for a source cell
    pub fn from_source(source: &str) -> Self {
        let source = source.trim();
        if source.is_empty() || source == ALL_PODS_KEYWORD {
            GroupKey::AllPods
        } else {
            GroupKey::Source(source.to_string())
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::AllPods => f.write_str(ALL_PODS_KEYWORD),
            GroupKey::Source(s) => f.write_str(s),
        }
    }
}
