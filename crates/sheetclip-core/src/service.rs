//! The remote range boundary.

use crate::error::Result;
use crate::grid::{Grid, Patch};
use crate::range::Range;

/// Trait for remote range access.
///
/// The core consumes and produces grids; authentication and wire details
/// belong to the implementation. Implemented by the REST client in the
/// binary and by in-memory fakes in tests.
pub trait RangeService {
    /// Fetch the values of a rectangular range.
    fn get_range(&self, spreadsheet_id: &str, range: &Range) -> Result<Grid>;

    /// Write into a rectangular range. `None` cells in the patch must leave
    /// the corresponding remote cells untouched.
    fn set_range(&self, spreadsheet_id: &str, range: &Range, values: &Patch) -> Result<()>;
}
