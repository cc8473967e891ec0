//! WOOP stage catalog.
//!
//! The fixed interview order (Wish, Outcome, Obstacle, Plan, then the
//! terminal Summary), the static per-stage definitions, the collected
//! answers, and the instruction payloads sent to the generation service.

mod answers;
mod catalog;
mod errors;
mod prompts;
mod stage;

pub use answers::WoopAnswers;
pub use catalog::{definition_for, first_stage, ProgrammeOverview, StageDefinition, OVERVIEW};
pub use errors::InvalidStageError;
pub use prompts::{
    CoachTurnPrompt, FinalReportPrompt, COACHING_RULES, COACH_PERSONA, REPORT_SECTIONS,
    REPORT_TITLE_PHRASES,
};
pub use stage::Stage;
