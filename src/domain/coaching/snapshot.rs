//! Read-only view of a session for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;
use crate::domain::woop::{Stage, WoopAnswers};

use super::ConversationTurn;

/// Everything a front end needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub stage: Stage,
    pub stage_title: String,
    pub progress_percent: u8,
    pub transcript: Vec<ConversationTurn>,
    /// Input should be disabled and a "thinking" indicator shown.
    pub awaiting_reply: bool,
    pub answers: WoopAnswers,
    pub can_advance: bool,
    pub can_retreat: bool,
}
