//! Spreadsheet rule compiler
//!
//! Turns a grid of spreadsheet cells into grouped CiliumNetworkPolicy
//! documents:
//!
//! 1. [`extract`] reads the namespace and one [`RuleRecord`] per row, grouped
//!    by the row's source column.
//! 2. [`baseline`] puts the baseline rules into the all-pods group.
//! 3. [`assemble`] builds one policy per group, using [`rules`] and
//!    [`classify`] for the individual ingress and egress rules.

pub mod assemble;
pub mod baseline;
pub mod classify;
pub mod error;
pub mod extract;
pub mod grid;
pub mod options;
pub mod record;
pub mod rules;

pub use assemble::assemble;
pub use baseline::{inject, Baseline, BaselineRule, Detection, InjectOutcome};
pub use classify::{classify, Peer};
pub use error::{ExtractError, Result};
pub use extract::{extract, Extraction, Groups};
pub use grid::Grid;
pub use options::{BaselinePolicy, RulesPlacement};
pub use record::{Direction, GroupKey, RuleRecord, ALL_PODS_KEYWORD};
pub use rules::{build_egress, build_ingress};
