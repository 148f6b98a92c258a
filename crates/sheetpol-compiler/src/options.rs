//! Conversion variants
//!
//! Two behaviours of the converter have more than one accepted form. Each is
//! an explicit option with a documented default rather than a hidden choice.

use clap::ValueEnum;

/// Where an opaque `rules` block is attached inside a rule
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RulesPlacement {
    /// Inside the `toPorts` entry, next to `ports` (default)
    #[default]
    PortRule,
    /// On the rule itself, next to `toPorts`
    Rule,
}

/// How the baseline rules populate the all-pods group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BaselinePolicy {
    /// Always replace the all-pods group with the baseline rules (default)
    #[default]
    Always,
    /// Replace the all-pods group only when some baseline rule is missing
    /// from the input
    WhenMissing,
}
