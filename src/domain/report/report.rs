//! The compiled report.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::woop::{Stage, WoopAnswers};

use super::{parse_report, ExecutionLog, ReportBlock};

/// One of the four headline cards shown above the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub stage: Stage,
    pub label: &'static str,
    pub value: String,
}

/// Final artifact of a completed interview.
///
/// Immutable once built, apart from the execution log which the user keeps
/// filling in over the following four weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    answers: WoopAnswers,
    narrative_text: String,
    blocks: Vec<ReportBlock>,
    execution_log: ExecutionLog,
    generated_at: Timestamp,
}

impl Report {
    /// Builds a report around generated narrative text.
    pub fn from_narrative(answers: WoopAnswers, narrative_text: impl Into<String>) -> Self {
        let narrative_text = narrative_text.into();
        let blocks = parse_report(&narrative_text);
        let generated_at = Timestamp::now();
        Self {
            answers,
            narrative_text,
            blocks,
            execution_log: ExecutionLog::new(generated_at),
            generated_at,
        }
    }

    /// Builds a report whose narrative could not be generated.
    pub fn without_narrative(answers: WoopAnswers) -> Self {
        Self::from_narrative(answers, String::new())
    }

    pub fn answers(&self) -> &WoopAnswers {
        &self.answers
    }

    /// Returns the narrative text exactly as generated.
    pub fn narrative_text(&self) -> &str {
        &self.narrative_text
    }

    pub fn blocks(&self) -> &[ReportBlock] {
        &self.blocks
    }

    pub fn has_narrative(&self) -> bool {
        !self.narrative_text.trim().is_empty()
    }

    /// First top-level heading of the narrative.
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            ReportBlock::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn generated_at(&self) -> Timestamp {
        self.generated_at
    }

    pub fn execution_log(&self) -> &ExecutionLog {
        &self.execution_log
    }

    pub fn execution_log_mut(&mut self) -> &mut ExecutionLog {
        &mut self.execution_log
    }

    /// Headline cards, the plan phrased as its if-then rule.
    pub fn summary_cards(&self) -> [SummaryCard; 4] {
        let a = &self.answers;
        [
            SummaryCard {
                stage: Stage::Wish,
                label: "W - Wish",
                value: a.wish.clone(),
            },
            SummaryCard {
                stage: Stage::Outcome,
                label: "O - Outcome",
                value: a.outcome.clone(),
            },
            SummaryCard {
                stage: Stage::Obstacle,
                label: "O - Obstacle",
                value: a.obstacle.clone(),
            },
            SummaryCard {
                stage: Stage::Plan,
                label: "P - Plan (If-Then)",
                value: a.if_then_rule(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> WoopAnswers {
        WoopAnswers::new(
            "Finish my dissertation chapter",
            "Relief and a free weekend",
            "I reread old notes instead of writing",
            "open the draft and write one paragraph",
        )
    }

    #[test]
    fn narrative_is_kept_verbatim_and_parsed() {
        let text = "# A systemic research report on my 28-day path\n\n## Mechanism\nBody";
        let report = Report::from_narrative(answers(), text);

        assert_eq!(report.narrative_text(), text);
        assert_eq!(report.blocks().len(), 4);
        assert_eq!(
            report.title(),
            Some("A systemic research report on my 28-day path")
        );
        assert!(report.has_narrative());
        assert_eq!(report.answers(), &answers());
    }

    #[test]
    fn without_narrative_keeps_answers_and_fresh_log() {
        let report = Report::without_narrative(answers());

        assert!(!report.has_narrative());
        assert!(report.blocks().is_empty());
        assert_eq!(report.title(), None);
        assert_eq!(report.answers(), &answers());
        assert_eq!(report.execution_log().recorded_days(), 0);
    }

    #[test]
    fn plan_card_shows_if_then_rule() {
        let report = Report::without_narrative(answers());
        let cards = report.summary_cards();

        assert_eq!(cards[0].label, "W - Wish");
        assert_eq!(cards[0].value, "Finish my dissertation chapter");
        assert_eq!(cards[3].stage, Stage::Plan);
        assert_eq!(
            cards[3].value,
            "If I reread old notes instead of writing, then open the draft and write one paragraph"
        );
    }

    #[test]
    fn execution_log_is_mutable_through_report() {
        let mut report = Report::without_narrative(answers());
        report.execution_log_mut().mark(1, true).unwrap();
        assert_eq!(report.execution_log().completed_days(), 1);
    }
}
