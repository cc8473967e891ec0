//! Report handlers.

mod compile_report;

pub use compile_report::{CompileReportHandler, ReportCompilation};
