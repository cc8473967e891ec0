//! Coaching handlers - user submissions and stage navigation.

mod navigate_stage;
mod submit_user_text;

pub use navigate_stage::{AdvanceStageHandler, RetreatStageHandler};
pub use submit_user_text::{SubmitUserTextCommand, SubmitUserTextHandler, SubmitUserTextResult};
