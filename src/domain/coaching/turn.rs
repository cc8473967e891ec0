//! Conversation turns and the per-stage transcript.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Coach,
}

impl Speaker {
    /// Label used when the transcript is serialized for the coach.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Coach => "coach",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub at: Timestamp,
}

impl ConversationTurn {
    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            at: Timestamp::now(),
        }
    }

    /// Creates a coach turn.
    pub fn coach(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Coach,
            text: text.into(),
            at: Timestamp::now(),
        }
    }
}

/// Ordered, append-only exchange within the active stage.
///
/// Always starts with the stage's opening prompt. Turns are never removed
/// or reordered; changing stage replaces the whole transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Creates a transcript holding only the opening prompt.
    pub fn seeded(opening_prompt: &str) -> Self {
        Self {
            turns: vec![ConversationTurn::coach(opening_prompt)],
        }
    }

    pub(crate) fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Returns all turns in order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Serializes the transcript as `speaker: text` lines.
    pub fn to_context(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.speaker.label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True once a user turn has been answered by a coach turn.
    pub fn has_completed_exchange(&self) -> bool {
        self.turns
            .windows(2)
            .any(|pair| pair[0].speaker == Speaker::User && pair[1].speaker == Speaker::Coach)
    }
}
