//! Events raised by the coaching session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::woop::{Stage, WoopAnswers};

/// Something observable that happened inside a session.
///
/// Events accumulate on the session until drained with
/// `CoachingSession::take_events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session moved to another interview stage.
    StageEntered {
        from: Stage,
        to: Stage,
        at: Timestamp,
    },
    /// A user submission was stored as the stage answer.
    ///
    /// `overwritten` carries the earlier answer that was discarded, since
    /// only the latest submission per stage survives.
    AnswerRecorded {
        stage: Stage,
        overwritten: Option<String>,
        at: Timestamp,
    },
    /// A coach turn was appended; `degraded` marks the fallback message.
    CoachReplied {
        stage: Stage,
        degraded: bool,
        at: Timestamp,
    },
    /// The user advanced past the last stage.
    Completed { answers: WoopAnswers, at: Timestamp },
}

impl SessionEvent {
    /// Short machine-readable name, used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::StageEntered { .. } => "stage_entered",
            SessionEvent::AnswerRecorded { .. } => "answer_recorded",
            SessionEvent::CoachReplied { .. } => "coach_replied",
            SessionEvent::Completed { .. } => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = SessionEvent::CoachReplied {
            stage: Stage::Plan,
            degraded: true,
            at: Timestamp::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "coach_replied");
        assert_eq!(json["stage"], "PLAN");
        assert_eq!(json["degraded"], true);
    }

    #[test]
    fn name_matches_serde_tag() {
        let event = SessionEvent::AnswerRecorded {
            stage: Stage::Wish,
            overwritten: None,
            at: Timestamp::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
    }
}
