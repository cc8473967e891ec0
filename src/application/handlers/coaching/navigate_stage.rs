//! Stage navigation handlers.

use tracing::{debug, info};

use crate::application::SessionHandle;
use crate::domain::coaching::{AdvanceOutcome, RetreatOutcome, SessionError};

/// Handler for moving to the next stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceStageHandler;

impl AdvanceStageHandler {
    pub fn new() -> Self {
        Self
    }

    /// Advances the session. From PLAN this completes the interview and the
    /// outcome carries the final answers.
    pub async fn handle(&self, session: &SessionHandle) -> Result<AdvanceOutcome, SessionError> {
        let mut guard = session.lock().await;
        let session_id = guard.id();

        let outcome = guard.advance().map_err(|err| {
            debug!(session_id = %session_id, stage = %guard.stage(), error = %err, "Advance refused");
            err
        })?;

        match &outcome {
            AdvanceOutcome::Moved { from, to } => {
                info!(session_id = %session_id, from = %from, to = %to, "Stage advanced");
            }
            AdvanceOutcome::Completed(_) => {
                info!(session_id = %session_id, "Interview completed");
            }
        }
        Ok(outcome)
    }
}

/// Handler for moving back one stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetreatStageHandler;

impl RetreatStageHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, session: &SessionHandle) -> Result<RetreatOutcome, SessionError> {
        let mut guard = session.lock().await;
        let session_id = guard.id();

        let outcome = guard.retreat()?;
        if let RetreatOutcome::Moved { from, to } = outcome {
            info!(session_id = %session_id, from = %from, to = %to, "Stage retreated");
        }
        Ok(outcome)
    }
}
