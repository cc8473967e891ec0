//! Application handlers.
//!
//! Command handlers that orchestrate domain operations around the
//! generation gateway.

pub mod coaching;
pub mod report;

pub use coaching::{
    AdvanceStageHandler, RetreatStageHandler, SubmitUserTextCommand, SubmitUserTextHandler,
    SubmitUserTextResult,
};
pub use report::{CompileReportHandler, ReportCompilation};
