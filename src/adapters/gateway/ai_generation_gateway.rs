//! GenerationGateway implementation on top of an AIProvider.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::domain::woop::{CoachTurnPrompt, FinalReportPrompt, Stage, WoopAnswers};
use crate::ports::{
    AIProvider, CompletionRequest, GatewayError, GenerationGateway, MessageRole,
    RequestMetadata, RequestPurpose,
};

/// Knobs applied to every request the gateway sends.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Language the coach and the report are written in.
    pub language: String,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            max_output_tokens: None,
            temperature: None,
        }
    }
}

/// Sends each prompt as a single user message and returns the reply verbatim.
pub struct AIGenerationGateway {
    provider: Arc<dyn AIProvider>,
    settings: GenerationSettings,
}

impl AIGenerationGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self::with_settings(provider, GenerationSettings::default())
    }

    pub fn with_settings(provider: Arc<dyn AIProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    fn build_request(&self, purpose: RequestPurpose, prompt: String) -> CompletionRequest {
        let metadata = RequestMetadata::new(purpose, uuid::Uuid::new_v4().to_string());
        let mut request = CompletionRequest::new(metadata).with_message(MessageRole::User, prompt);
        if let Some(max) = self.settings.max_output_tokens {
            request = request.with_max_tokens(max);
        }
        if let Some(temperature) = self.settings.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }

    /// One round trip; blank replies count as failures.
    async fn generate(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let purpose = request.metadata.purpose;
        let trace_id = request.metadata.trace_id.clone();
        let prompt_tokens = self.provider.estimate_tokens(&request.prompt_text());
        let started = Instant::now();

        let response = self.provider.complete(request).await.map_err(|e| {
            warn!(
                purpose = %purpose,
                trace_id = %trace_id,
                retryable = e.is_retryable(),
                error = %e,
                "Generation request failed"
            );
            GatewayError::from(e)
        })?;

        debug!(
            purpose = %purpose,
            trace_id = %trace_id,
            model = %response.model,
            prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            finish_reason = ?response.finish_reason,
            latency_ms = started.elapsed().as_millis() as u64,
            "Generation request completed"
        );

        if response.content.trim().is_empty() {
            warn!(purpose = %purpose, trace_id = %trace_id, "Generation returned no text");
            return Err(GatewayError::EmptyResponse);
        }
        Ok(response.content)
    }
}

#[async_trait]
impl GenerationGateway for AIGenerationGateway {
    async fn request_coach_turn(
        &self,
        stage: Stage,
        user_text: &str,
        transcript_context: &str,
    ) -> Result<String, GatewayError> {
        let prompt = CoachTurnPrompt {
            stage,
            user_text,
            transcript_context,
            language: &self.settings.language,
        }
        .render()?;

        self.generate(self.build_request(RequestPurpose::CoachTurn(stage), prompt))
            .await
    }

    async fn request_final_report(&self, answers: &WoopAnswers) -> Result<String, GatewayError> {
        let prompt = FinalReportPrompt {
            answers,
            language: &self.settings.language,
        }
        .render();

        self.generate(self.build_request(RequestPurpose::FinalReport, prompt))
            .await
    }
}
