//! A1-notation cell and range references.
//!
//! Bidirectional conversion between spreadsheet-style references ("A1",
//! "B2:D10", "Sheet!A1:B5") and zero-indexed coordinates.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{CoreError, Result};

static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").unwrap()
});

static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+[0-9]+(:[A-Za-z]+[0-9]*)?$").unwrap());

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from A1 notation (e.g., "A1", "B2", "AA10").
    /// Returns None if the input is invalid.
    pub fn parse(name: &str) -> Option<CellRef> {
        let caps = CELL_RE.captures(name)?;

        let col = letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(col, row))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

fn letters_to_col(letters: &str) -> Option<usize> {
    let mut acc = 0usize;
    for c in letters.to_ascii_uppercase().bytes() {
        let digit = (c - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    acc.checked_sub(1)
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// A range reference: an optional worksheet title plus an A1 span.
///
/// The span is kept as text because the remote API addresses ranges in A1
/// notation directly; [`Range::bounded_span`] parses it back out when a
/// caller needs concrete dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub worksheet: Option<String>,
    pub a1: String,
}

impl Range {
    /// Build a range from user input, rejecting spans that are not A1-shaped.
    /// Accepts single cells ("B3"), bounded spans ("A1:B5"), and column-open
    /// spans ("A2:B").
    pub fn new(a1: &str, worksheet: Option<String>) -> Result<Range> {
        if !SPAN_RE.is_match(a1) {
            return Err(CoreError::InvalidRange(a1.to_string()));
        }
        Ok(Range {
            worksheet,
            a1: a1.to_string(),
        })
    }

    /// Read span for a test pass: expressions and expected values from
    /// columns A and B, open-ended downward. `start_row` is 1-based.
    pub fn test_input(worksheet: Option<String>, start_row: usize) -> Range {
        Range {
            worksheet,
            a1: format!("A{}:B", start_row.max(1)),
        }
    }

    /// Write span for a test pass: actuals and verdicts into columns C and D,
    /// one row per input row.
    pub fn test_output(worksheet: Option<String>, start_row: usize, row_count: usize) -> Range {
        let start = start_row.max(1);
        let end = start + row_count.saturating_sub(1);
        Range {
            worksheet,
            a1: format!("C{}:D{}", start, end),
        }
    }

    /// Start/end cells when both ends of the span are full cell references.
    /// A single cell yields a one-cell span; open spans yield None.
    pub fn bounded_span(&self) -> Option<(CellRef, CellRef)> {
        match self.a1.split_once(':') {
            Some((start, end)) => Some((CellRef::parse(start)?, CellRef::parse(end)?)),
            None => {
                let cell = CellRef::parse(&self.a1)?;
                Some((cell.clone(), cell))
            }
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.worksheet {
            Some(title) if title.chars().all(|c| c.is_ascii_alphanumeric()) => {
                write!(f, "{}!{}", title, self.a1)
            }
            Some(title) => write!(f, "'{}'!{}", title.replace('\'', "''"), self.a1),
            None => write!(f, "{}", self.a1),
        }
    }
}
