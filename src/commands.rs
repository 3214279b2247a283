//! Command implementations behind the CLI verbs.

use anyhow::{Context, Result, bail};

use sheetclip_core::{Grid, Patch, Range, RangeService, codec, run_sheet_tests};

use crate::clipboard::ClipboardProvider;
use crate::config::Settings;

/// `configure`: validate that a token source is available and show it.
pub fn configure(settings: &Settings) -> Result<()> {
    let _ = settings.require_token()?;
    println!("Token source: {}", settings.token_source());
    if let Some(path) = crate::config::config_file_path() {
        println!("Config file: {}", path.display());
    }
    Ok(())
}

/// `pull`: fetch a range, print it as tab-separated text, and copy it to the
/// clipboard unless disabled.
pub fn pull(
    service: &dyn RangeService,
    clipboard: &mut dyn ClipboardProvider,
    spreadsheet_id: &str,
    range: &Range,
    copy: bool,
) -> Result<()> {
    let grid = service.get_range(spreadsheet_id, range)?;

    if grid.is_empty() {
        eprintln!("No data returned for {}", range);
        return Ok(());
    }

    let text = codec::serialize(&grid);
    println!("{}", text);

    if copy {
        clipboard
            .set_text(&text)
            .context("failed to copy pulled values")?;
        eprintln!("Copied {} rows to clipboard.", grid.row_count());
    }

    Ok(())
}

/// `push`: decode a tab-separated payload and write it into the range.
///
/// The payload is trimmed before decoding (clipboard round trips often pick
/// up a trailing newline); the codec itself stays exact.
pub fn push(
    service: &dyn RangeService,
    spreadsheet_id: &str,
    range: &Range,
    payload: &str,
) -> Result<()> {
    let grid = codec::deserialize(payload.trim());
    if grid.is_empty() {
        bail!("payload is empty or not formatted as rows");
    }

    check_fit(range, &grid)?;

    // A push overwrites the whole range, so every cell is present.
    service.set_range(spreadsheet_id, range, &Patch::from(&grid))?;
    println!("Updated range {} with {} rows.", range, grid.row_count());
    Ok(())
}

/// When the target range is fully bounded, refuse a payload that would spill
/// past it rather than letting the remote end truncate or reject it.
fn check_fit(range: &Range, grid: &Grid) -> Result<()> {
    let Some((start, end)) = range.bounded_span() else {
        return Ok(());
    };

    let target_rows = end.row.saturating_sub(start.row) + 1;
    let target_cols = end.col.saturating_sub(start.col) + 1;

    if grid.row_count() > target_rows || grid.width() > target_cols {
        bail!(
            "payload is {} rows x {} columns but range {} holds {} rows x {} columns",
            grid.row_count(),
            grid.width(),
            range,
            target_rows,
            target_cols
        );
    }
    Ok(())
}

/// `eval-tests`: run the sheet test pass and print a per-row summary.
pub fn eval_tests(
    service: &dyn RangeService,
    spreadsheet_id: &str,
    worksheet: Option<String>,
    start_row: usize,
) -> Result<()> {
    let report = run_sheet_tests(service, spreadsheet_id, worksheet, start_row)?;

    if report.rows.is_empty() {
        eprintln!("No test rows found.");
        return Ok(());
    }

    for (index, row) in report.rows.iter().enumerate() {
        if let Some(outcome) = row {
            println!(
                "row {}: {} ({})",
                start_row.max(1) + index,
                outcome.verdict,
                outcome.actual
            );
        }
    }

    let (passed, failed, errored) = report.tally();
    println!("{} passed, {} failed, {} errored", passed, failed, errored);
    Ok(())
}
