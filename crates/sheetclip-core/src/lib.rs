//! sheetclip-core - UI-agnostic model: grids, the tab-separated codec,
//! A1 ranges, the remote range boundary, and the sheet test harness.

pub mod codec;
pub mod error;
pub mod grid;
pub mod harness;
pub mod range;
pub mod service;

pub use error::{CoreError, Result};
pub use grid::{Grid, Patch};
pub use harness::{Outcome, TestReport, Verdict, judge, run_pass, run_sheet_tests};
pub use range::{CellRef, Range};
pub use service::RangeService;
