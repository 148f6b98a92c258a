//! In-memory spreadsheet grid

/// Rows of cell text, addressed by zero-based (row, column).
///
/// Rows may have different lengths; cells outside a row read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Cell text, or `""` for a cell outside the grid
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R, C> FromIterator<R> for Grid
where
    R: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
