//! Application layer - session handle, gateway policy and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod gateway_policy;
pub mod handlers;
mod session;

pub use gateway_policy::GatewayPolicy;
pub use handlers::{
    // Coaching handlers
    AdvanceStageHandler, RetreatStageHandler, SubmitUserTextCommand, SubmitUserTextHandler,
    SubmitUserTextResult,
    // Report handlers
    CompileReportHandler, ReportCompilation,
};
pub use session::SessionHandle;
