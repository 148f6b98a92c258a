//! Row extraction
//!
//! Sheet layout (zero-based rows, columns A..F = 0..5):
//!
//! | row | A                 | B        | C      | D         | E           | F    |
//! |-----|-------------------|----------|--------|-----------|-------------|------|
//! | 0   | title (ignored)   |          |        |           |             |      |
//! | 1   | `namespace: prod` |          |        |           |             |      |
//! | 2.. | row marker        | protocol | source | direction | destination | port |
//!
//! Rule rows with an empty column A are skipped.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use crate::grid::Grid;
use crate::record::{Direction, GroupKey, RuleRecord};

const NAMESPACE_ROW: usize = 1;
const FIRST_RULE_ROW: usize = 2;

const COL_MARKER: usize = 0;
const COL_PROTOCOL: usize = 1;
const COL_SOURCE: usize = 2;
const COL_DIRECTION: usize = 3;
const COL_DESTINATION: usize = 4;
const COL_PORT: usize = 5;

/// Records grouped by key, in first-seen key order
pub type Groups = IndexMap<GroupKey, Vec<RuleRecord>>;

/// Namespace and grouped records read from a grid
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    pub namespace: String,
    pub groups: Groups,
}

/// Read the namespace and rule records from a grid
pub fn extract(grid: &Grid) -> Result<Extraction> {
    let namespace = extract_namespace(grid)?;

    let mut groups = Groups::new();
    let mut records = 0usize;
    for row in FIRST_RULE_ROW..grid.row_count() {
        if grid.cell(row, COL_MARKER).trim().is_empty() {
            continue;
        }
        let record = record_from_row(grid, row);
        let key = GroupKey::from_source(grid.cell(row, COL_SOURCE));
        debug!(
            row,
            group = %key,
            direction = %record.direction,
            peer = record.peer_text(),
            "extracted rule row"
        );
        groups.entry(key).or_default().push(record);
        records += 1;
    }

    debug!(
        namespace = %namespace,
        groups = groups.len(),
        records,
        "extracted rule rows"
    );
    Ok(Extraction { namespace, groups })
}

fn extract_namespace(grid: &Grid) -> Result<String> {
    let cell = grid.cell(NAMESPACE_ROW, COL_MARKER).trim();
    match cell.split_once(':') {
        Some((_, namespace)) => Ok(namespace.trim().to_string()),
        None => Err(ExtractError::missing_namespace(cell)),
    }
}

fn record_from_row(grid: &Grid, row: usize) -> RuleRecord {
    let text = |col: usize| grid.cell(row, col).trim().to_string();
    let direction_cell = text(COL_DIRECTION).to_lowercase();
    if direction_cell != Direction::Ingress.as_str() && direction_cell != Direction::Egress.as_str()
    {
        warn!(row, direction = %direction_cell, "unrecognized direction, rendering as egress");
    }
    RuleRecord {
        protocol: text(COL_PROTOCOL),
        source: text(COL_SOURCE),
        direction: Direction::from_cell(&direction_cell),
        destination: text(COL_DESTINATION),
        port: text(COL_PORT),
        labels: None,
        rules: None,
    }
}
