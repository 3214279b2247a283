//! Rectangular grid of cell values.

/// An ordered sequence of rows of textual cell values.
///
/// Rows may arrive ragged from the remote API (trailing empty cells are
/// omitted); accessors treat missing trailing cells as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at (row, col), with missing trailing cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl From<Vec<Vec<String>>> for Grid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}

/// A rectangular write where `None` cells leave the existing remote content
/// alone.
///
/// The remote values API distinguishes an empty string (clear the cell) from
/// an absent cell (keep it); a `Patch` carries that distinction so one
/// rectangular write can skip rows without wiping them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Patch {
    rows: Vec<Vec<Option<String>>>,
}

impl Patch {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Grid> for Patch {
    /// A full overwrite: every cell present, empty strings included.
    fn from(grid: Grid) -> Self {
        Self {
            rows: grid
                .into_rows()
                .into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        }
    }
}

impl From<&Grid> for Patch {
    fn from(grid: &Grid) -> Self {
        grid.clone().into()
    }
}
