//! Report domain module.
//!
//! The final artifact of a completed interview: the four answers, the
//! generated narrative split into typed blocks, and the 28-day execution log.

mod blocks;
mod execution_log;
mod report;

pub use blocks::{classify_line, parse_report, ReportBlock};
pub use execution_log::{DayEntry, ExecutionLog, EXECUTION_DAYS};
pub use report::{Report, SummaryCard};
