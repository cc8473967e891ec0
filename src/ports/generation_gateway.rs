//! Generation Gateway Port - the two requests the coaching flow makes.
//!
//! One operation per conversational turn and one for the final report.
//! Implementations hold no session state: each call is a pure function of
//! its inputs plus one round trip to the generation service.

use async_trait::async_trait;

use crate::domain::woop::{InvalidStageError, Stage, WoopAnswers};

use super::AIError;

/// Port for generating coach replies and the final report.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generates the coach's reply to the latest user text.
    ///
    /// `transcript_context` is the stage transcript serialized before the
    /// user's turn was appended. The reply text is returned verbatim.
    async fn request_coach_turn(
        &self,
        stage: Stage,
        user_text: &str,
        transcript_context: &str,
    ) -> Result<String, GatewayError>;

    /// Generates the narrative report for a completed interview.
    async fn request_final_report(&self, answers: &WoopAnswers) -> Result<String, GatewayError>;
}

/// Gateway failures. Callers recover from every variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("generation provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("generation service returned no text")]
    EmptyResponse,

    #[error("no reply within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error(transparent)]
    Prompt(#[from] InvalidStageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_convert() {
        let err: GatewayError = AIError::AuthenticationFailed.into();
        assert_eq!(
            err.to_string(),
            "generation provider failed: authentication failed"
        );
    }

    #[test]
    fn timeout_names_duration() {
        let err = GatewayError::Timeout { timeout_secs: 90 };
        assert_eq!(err.to_string(), "no reply within 90s");
    }
}
