//! Sheet-based test harness: per-row judging and the evaluation pass.
//!
//! A test row pairs an expression (column A) with an expected value
//! (column B). The pass evaluates each expression with the engine, judges
//! the result, and produces an aligned grid of [actual, verdict] pairs for
//! columns C and D.

use std::fmt;

use sheetclip_engine::{EvalError, eval_expression};

use crate::error::Result;
use crate::grid::{Grid, Patch};
use crate::range::Range;
use crate::service::RangeService;

/// Classification of one test row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Error => "ERROR",
        };
        f.write_str(token)
    }
}

/// The judged result of one test row: the actual value (or error message)
/// and its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub actual: String,
    pub verdict: Verdict,
}

/// Classify one row by comparing the evaluator's result to the expected cell.
///
/// Evaluation failure is ERROR with the error message as the actual text.
/// Success compares trimmed strings: equal is PASS, anything else (including
/// an empty expected cell) is FAIL. This function is total; nothing
/// propagates out of it.
pub fn judge(expected: &str, result: std::result::Result<String, EvalError>) -> Outcome {
    match result {
        Err(e) => Outcome {
            actual: e.to_string(),
            verdict: Verdict::Error,
        },
        Ok(actual) => {
            let verdict = if !expected.trim().is_empty() && actual.trim() == expected.trim() {
                Verdict::Pass
            } else {
                Verdict::Fail
            };
            Outcome { actual, verdict }
        }
    }
}

/// Results of one evaluation pass, aligned with the input rows.
///
/// `None` marks a skipped row (empty or whitespace-only expression).
#[derive(Debug, Clone, Default)]
pub struct TestReport {
    pub rows: Vec<Option<Outcome>>,
}

impl TestReport {
    /// Count of (pass, fail, error) outcomes.
    pub fn tally(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for outcome in self.rows.iter().flatten() {
            match outcome.verdict {
                Verdict::Pass => counts.0 += 1,
                Verdict::Fail => counts.1 += 1,
                Verdict::Error => counts.2 += 1,
            }
        }
        counts
    }

    /// Write-back patch for columns C and D. Skipped rows contribute a pair
    /// of absent cells: a single rectangular write stays row-aligned while
    /// the remote end leaves those cells exactly as they were. Writing empty
    /// strings instead would clear them.
    pub fn to_patch(&self) -> Patch {
        let mut patch = Patch::new();
        for row in &self.rows {
            match row {
                Some(outcome) => {
                    patch.push_row(vec![
                        Some(outcome.actual.clone()),
                        Some(outcome.verdict.to_string()),
                    ]);
                }
                None => patch.push_row(vec![None, None]),
            }
        }
        patch
    }
}

/// Evaluate every test row of `input` in ascending row order.
///
/// Column 0 holds expressions, column 1 expected values. Rows with an empty
/// expression are skipped; a failing row never aborts the rows after it.
pub fn run_pass(input: &Grid) -> TestReport {
    let mut report = TestReport::default();

    for row in 0..input.row_count() {
        let expression = input.cell(row, 0);
        if expression.trim().is_empty() {
            report.rows.push(None);
            continue;
        }

        let expected = input.cell(row, 1);
        let outcome = judge(expected, eval_expression(expression));
        report.rows.push(Some(outcome));
    }

    report
}

/// Run a full sheet test pass against a remote service: read `A{start}:B`,
/// evaluate, and write the outcomes back to `C{start}:D{...}` in one call.
///
/// `start_row` is 1-based. Returns the report so the caller can print a
/// summary. An empty input range performs no write.
pub fn run_sheet_tests(
    service: &dyn RangeService,
    spreadsheet_id: &str,
    worksheet: Option<String>,
    start_row: usize,
) -> Result<TestReport> {
    let input_range = Range::test_input(worksheet.clone(), start_row);
    let input = service.get_range(spreadsheet_id, &input_range)?;

    let report = run_pass(&input);
    if report.rows.is_empty() {
        return Ok(report);
    }

    let output_range = Range::test_output(worksheet, start_row, report.rows.len());
    service.set_range(spreadsheet_id, &output_range, &report.to_patch())?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_judge_pass() {
        let outcome = judge("4", Ok("4".to_string()));
        assert_eq!(outcome.verdict, Verdict::Pass);
        assert_eq!(outcome.actual, "4");
    }

    #[test]
    fn test_judge_fail() {
        let outcome = judge("5", Ok("4".to_string()));
        assert_eq!(outcome.verdict, Verdict::Fail);
        assert_eq!(outcome.actual, "4");
    }

    #[test]
    fn test_judge_trims_both_sides() {
        assert_eq!(judge(" 4 ", Ok("4".to_string())).verdict, Verdict::Pass);
        assert_eq!(judge("4", Ok("  4\t".to_string())).verdict, Verdict::Pass);
    }

    #[test]
    fn test_judge_error_carries_message() {
        let outcome = judge("anything", Err(EvalError::DivideByZero));
        assert_eq!(outcome.verdict, Verdict::Error);
        assert_eq!(outcome.actual, "division by zero");
    }

    #[test]
    fn test_judge_empty_expected_fails_on_success() {
        let outcome = judge("", Ok("4".to_string()));
        assert_eq!(outcome.verdict, Verdict::Fail);
        assert_eq!(judge("   ", Ok("4".to_string())).verdict, Verdict::Fail);
    }

    #[test]
    fn test_judge_empty_expected_error_is_still_error() {
        let outcome = judge("", Err(EvalError::DivideByZero));
        assert_eq!(outcome.verdict, Verdict::Error);
    }

    #[test]
    fn test_run_pass_basic_rows() {
        let input = grid(&[&["2+2", "4"], &["2+2", "5"], &["1/0", "anything"]]);
        let report = run_pass(&input);

        let outcomes: Vec<_> = report.rows.iter().map(|r| r.clone().unwrap()).collect();
        assert_eq!(outcomes[0].verdict, Verdict::Pass);
        assert_eq!(outcomes[0].actual, "4");
        assert_eq!(outcomes[1].verdict, Verdict::Fail);
        assert_eq!(outcomes[1].actual, "4");
        assert_eq!(outcomes[2].verdict, Verdict::Error);
        assert_eq!(outcomes[2].actual, "division by zero");

        assert_eq!(report.tally(), (1, 1, 1));
    }

    #[test]
    fn test_run_pass_skips_empty_expressions() {
        let input = grid(&[&["", "5"], &["   ", "5"], &["1+1", "2"]]);
        let report = run_pass(&input);

        assert!(report.rows[0].is_none());
        assert!(report.rows[1].is_none());
        assert_eq!(report.rows[2].as_ref().unwrap().verdict, Verdict::Pass);
        assert_eq!(report.tally(), (1, 0, 0));
    }

    #[test]
    fn test_run_pass_error_does_not_abort_later_rows() {
        let input = grid(&[&["nope(", "x"], &["2*3", "6"]]);
        let report = run_pass(&input);

        assert_eq!(report.rows[0].as_ref().unwrap().verdict, Verdict::Error);
        assert_eq!(report.rows[1].as_ref().unwrap().verdict, Verdict::Pass);
    }

    #[test]
    fn test_run_pass_ragged_rows_missing_expected() {
        // Expected cell absent entirely: success judges as FAIL.
        let input = grid(&[&["1+1"]]);
        let report = run_pass(&input);
        assert_eq!(report.rows[0].as_ref().unwrap().verdict, Verdict::Fail);
    }

    #[test]
    fn test_report_patch_keeps_row_alignment() {
        let input = grid(&[&["1+1", "2"], &["", ""], &["1/0", "9"]]);
        let out = run_pass(&input).to_patch();

        assert_eq!(
            out.rows()[0],
            vec![Some("2".to_string()), Some("PASS".to_string())]
        );
        assert_eq!(out.rows()[1], vec![None, None]);
        assert_eq!(
            out.rows()[2],
            vec![Some("division by zero".to_string()), Some("ERROR".to_string())]
        );
    }

    #[test]
    fn test_skipped_rows_never_emit_empty_strings() {
        // An empty-string cell in the write would clear the remote cell;
        // a skipped row has to stay absent instead.
        let input = grid(&[&["", "stale actual"], &["2+2", "4"]]);
        let out = run_pass(&input).to_patch();

        assert!(out.rows()[0].iter().all(Option::is_none));
        assert!(out.rows()[1].iter().all(Option::is_some));
    }
}
