//! The structured answers collected across the interview.

use serde::{Deserialize, Serialize};

use super::{InvalidStageError, Stage};

/// One slot per interview stage, each holding the latest submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoopAnswers {
    pub wish: String,
    pub outcome: String,
    pub obstacle: String,
    pub plan: String,
}

impl WoopAnswers {
    /// Creates answers from four literal strings.
    pub fn new(
        wish: impl Into<String>,
        outcome: impl Into<String>,
        obstacle: impl Into<String>,
        plan: impl Into<String>,
    ) -> Self {
        Self {
            wish: wish.into(),
            outcome: outcome.into(),
            obstacle: obstacle.into(),
            plan: plan.into(),
        }
    }

    /// Returns the answer recorded for a stage.
    pub fn get(&self, stage: Stage) -> Result<&str, InvalidStageError> {
        match stage {
            Stage::Wish => Ok(&self.wish),
            Stage::Outcome => Ok(&self.outcome),
            Stage::Obstacle => Ok(&self.obstacle),
            Stage::Plan => Ok(&self.plan),
            Stage::Summary => Err(InvalidStageError(stage)),
        }
    }

    /// Overwrites the answer for a stage.
    ///
    /// Returns the value that was replaced, if the slot held one.
    pub fn record(
        &mut self,
        stage: Stage,
        text: impl Into<String>,
    ) -> Result<Option<String>, InvalidStageError> {
        let slot = match stage {
            Stage::Wish => &mut self.wish,
            Stage::Outcome => &mut self.outcome,
            Stage::Obstacle => &mut self.obstacle,
            Stage::Plan => &mut self.plan,
            Stage::Summary => return Err(InvalidStageError(stage)),
        };
        let previous = std::mem::replace(slot, text.into());
        Ok(Some(previous).filter(|p| !p.is_empty()))
    }

    /// The plan phrased as an implementation intention.
    pub fn if_then_rule(&self) -> String {
        format!("If {}, then {}", self.obstacle, self.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_answers_are_empty() {
        let answers = WoopAnswers::default();
        for stage in Stage::interview() {
            assert_eq!(answers.get(*stage).unwrap(), "");
        }
    }

    #[test]
    fn record_sets_the_matching_slot() {
        let mut answers = WoopAnswers::default();
        answers.record(Stage::Obstacle, "I doubt myself").unwrap();

        assert_eq!(answers.obstacle, "I doubt myself");
        assert_eq!(answers.get(Stage::Obstacle).unwrap(), "I doubt myself");
        assert_eq!(answers.wish, "");
    }

    #[test]
    fn record_overwrites_and_returns_previous() {
        let mut answers = WoopAnswers::default();
        assert_eq!(answers.record(Stage::Wish, "first").unwrap(), None);
        assert_eq!(
            answers.record(Stage::Wish, "second").unwrap(),
            Some("first".to_string())
        );
        assert_eq!(answers.wish, "second");
    }

    #[test]
    fn summary_has_no_slot() {
        let mut answers = WoopAnswers::default();
        assert_eq!(
            answers.record(Stage::Summary, "x"),
            Err(InvalidStageError(Stage::Summary))
        );
        assert!(answers.get(Stage::Summary).is_err());
    }

    #[test]
    fn if_then_rule_joins_obstacle_and_plan() {
        let answers = WoopAnswers::new("w", "o", "I feel tired", "I stretch for one minute");
        assert_eq!(
            answers.if_then_rule(),
            "If I feel tired, then I stretch for one minute"
        );
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_value(WoopAnswers::new("a", "b", "c", "d")).unwrap();
        assert_eq!(json["wish"], "a");
        assert_eq!(json["plan"], "d");
    }
}
