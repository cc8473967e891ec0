//! Error types for the coaching session.

use crate::domain::foundation::ValidationError;
use crate::domain::woop::{InvalidStageError, Stage};

/// Reasons a session operation is rejected.
///
/// A rejected operation never changes the session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("User text cannot be empty")]
    EmptyInput,

    #[error("A coach reply is still pending")]
    AlreadyAwaitingReply,

    #[error("Stage {0} has no completed exchange yet")]
    StageNotAnswered(Stage),

    #[error("The interview is already complete")]
    SessionComplete,

    #[error("Reply does not belong to the pending turn")]
    StaleTurn,

    #[error(transparent)]
    InvalidStage(#[from] InvalidStageError),

    #[error("Invalid stage transition: {0}")]
    Transition(#[from] ValidationError),
}
