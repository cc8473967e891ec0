//! SubmitUserText command handler.
//!
//! Takes one user submission through a full turn: open the turn on the
//! session, ask the gateway for the coach's reply, then close the turn with
//! either the reply or the fallback apology. The session lock is never held
//! across the gateway call, so a second submission arriving meanwhile sees
//! the claimed reply slot and is rejected.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::application::{GatewayPolicy, SessionHandle};
use crate::domain::coaching::{CoachReply, SessionError, TurnOutcome};
use crate::ports::{GatewayError, GenerationGateway};

/// Command carrying the user's text.
#[derive(Debug, Clone)]
pub struct SubmitUserTextCommand {
    pub text: String,
}

impl SubmitUserTextCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitUserTextResult {
    pub outcome: TurnOutcome,
    /// Why the fallback was used, if it was.
    pub gateway_error: Option<GatewayError>,
}

/// Handler for user submissions.
pub struct SubmitUserTextHandler {
    gateway: Arc<dyn GenerationGateway>,
    policy: GatewayPolicy,
}

impl SubmitUserTextHandler {
    pub fn new(gateway: Arc<dyn GenerationGateway>, policy: GatewayPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Handles a submission.
    ///
    /// # Errors
    ///
    /// - `EmptyInput`, `AlreadyAwaitingReply`, `SessionComplete` when the
    ///   session refuses the text (nothing changes)
    /// - `StaleTurn` when the session was restarted while the reply was
    ///   being generated
    ///
    /// Gateway failures are not errors: the turn completes with the
    /// fallback message and the failure is reported in the result.
    pub async fn handle(
        &self,
        session: &SessionHandle,
        cmd: SubmitUserTextCommand,
    ) -> Result<SubmitUserTextResult, SessionError> {
        // 1. Open the turn
        let (session_id, pending) = {
            let mut guard = session.lock().await;
            let pending = guard.begin_turn(&cmd.text)?;
            (guard.id(), pending)
        };
        let stage = pending.stage();

        // 2. Ask the coach, lock released
        let started = Instant::now();
        let result = self
            .policy
            .run(self.gateway.request_coach_turn(
                stage,
                pending.user_text(),
                pending.transcript_context(),
            ))
            .await;

        let (reply, gateway_error) = match result {
            Ok(text) => (CoachReply::Generated(text), None),
            Err(err) => {
                warn!(
                    session_id = %session_id,
                    stage = %stage,
                    error = %err,
                    "Coach reply failed, using fallback"
                );
                (
                    CoachReply::Fallback(self.policy.fallback_message.clone()),
                    Some(err),
                )
            }
        };

        // 3. Close the turn
        let outcome = session.lock().await.complete_turn(pending, reply)?;

        info!(
            session_id = %session_id,
            stage = %stage,
            text_len = cmd.text.len(),
            degraded = outcome.degraded,
            overwrote_answer = outcome.overwritten.is_some(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Coach turn completed"
        );

        Ok(SubmitUserTextResult {
            outcome,
            gateway_error,
        })
    }
}
