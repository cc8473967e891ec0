//! Stage enum representing the WOOP interview phases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The four WOOP interview stages plus the terminal summary.
///
/// Stages advance strictly one step at a time:
/// `Wish` → `Outcome` → `Obstacle` → `Plan` → `Summary`.
/// Any interview stage except `Wish` may step back once; `Summary` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Wish,
    Outcome,
    Obstacle,
    Plan,
    Summary,
}

impl Stage {
    /// Returns all stages in canonical order.
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Wish,
            Stage::Outcome,
            Stage::Obstacle,
            Stage::Plan,
            Stage::Summary,
        ]
    }

    /// Returns the stages that collect an answer, in interview order.
    pub fn interview() -> &'static [Stage] {
        &[Stage::Wish, Stage::Outcome, Stage::Obstacle, Stage::Plan]
    }

    /// Returns the 0-based position of this stage in the canonical order.
    pub fn ordinal(&self) -> usize {
        match self {
            Stage::Wish => 0,
            Stage::Outcome => 1,
            Stage::Obstacle => 2,
            Stage::Plan => 3,
            Stage::Summary => 4,
        }
    }

    /// Returns the stage that follows this one, if any.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Wish => Some(Stage::Outcome),
            Stage::Outcome => Some(Stage::Obstacle),
            Stage::Obstacle => Some(Stage::Plan),
            Stage::Plan => Some(Stage::Summary),
            Stage::Summary => None,
        }
    }

    /// Returns the interview stage one step back, if any.
    ///
    /// `Summary` has no predecessor: once the interview is complete it
    /// cannot be reopened.
    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::Wish | Stage::Summary => None,
            Stage::Outcome => Some(Stage::Wish),
            Stage::Obstacle => Some(Stage::Outcome),
            Stage::Plan => Some(Stage::Obstacle),
        }
    }

    /// Returns true for the four stages that collect an answer.
    pub fn is_interview(&self) -> bool {
        !matches!(self, Stage::Summary)
    }

    /// Identifier sent to the generation service (`WISH`, `OUTCOME`, ...).
    pub fn identifier(&self) -> &'static str {
        match self {
            Stage::Wish => "WISH",
            Stage::Outcome => "OUTCOME",
            Stage::Obstacle => "OBSTACLE",
            Stage::Plan => "PLAN",
            Stage::Summary => "SUMMARY",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Wish => "Wish",
            Stage::Outcome => "Outcome",
            Stage::Obstacle => "Obstacle",
            Stage::Plan => "Plan",
            Stage::Summary => "Summary",
        }
    }

    /// Completion percentage shown while this stage is active.
    ///
    /// Each of the five stages is worth a fifth: Wish shows 20, Summary 100.
    pub fn progress_percent(&self) -> u8 {
        ((self.ordinal() + 1) * 100 / Stage::all().len()) as u8
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target) || self.previous() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().chain(self.previous()).collect()
    }
}
