//! CompileReport handler - builds the final report for a completed interview.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::GatewayPolicy;
use crate::domain::report::Report;
use crate::domain::woop::WoopAnswers;
use crate::ports::{GatewayError, GenerationGateway};

/// Result of compiling a report.
///
/// A report is always produced. When generation fails the narrative is empty
/// and the failure travels alongside it so the caller can show an error
/// state instead of a silent placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCompilation {
    Ready(Report),
    Failed { report: Report, error: GatewayError },
}

impl ReportCompilation {
    pub fn report(&self) -> &Report {
        match self {
            Self::Ready(report) | Self::Failed { report, .. } => report,
        }
    }

    pub fn into_report(self) -> Report {
        match self {
            Self::Ready(report) | Self::Failed { report, .. } => report,
        }
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            Self::Ready(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Handler for compiling the final report.
pub struct CompileReportHandler {
    gateway: Arc<dyn GenerationGateway>,
    policy: GatewayPolicy,
}

impl CompileReportHandler {
    pub fn new(gateway: Arc<dyn GenerationGateway>, policy: GatewayPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Requests the narrative once and assembles the report around it.
    pub async fn compile(&self, answers: WoopAnswers) -> ReportCompilation {
        match self
            .policy
            .run(self.gateway.request_final_report(&answers))
            .await
        {
            Ok(narrative) => {
                let report = Report::from_narrative(answers, narrative);
                info!(
                    blocks = report.blocks().len(),
                    titled = report.title().is_some(),
                    "Report compiled"
                );
                ReportCompilation::Ready(report)
            }
            Err(error) => {
                warn!(error = %error, "Report generation failed");
                ReportCompilation::Failed {
                    report: Report::without_narrative(answers),
                    error,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::gateway::AIGenerationGateway;
    use crate::domain::report::{ReportBlock, EXECUTION_DAYS};
    use crate::ports::AIError;
    use std::time::Duration;

    fn answers() -> WoopAnswers {
        WoopAnswers::new("W", "O", "B", "P")
    }

    fn handler(provider: &MockAIProvider, policy: GatewayPolicy) -> CompileReportHandler {
        CompileReportHandler::new(
            Arc::new(AIGenerationGateway::new(Arc::new(provider.clone()))),
            policy,
        )
    }

    #[tokio::test]
    async fn success_parses_narrative_into_blocks() {
        let provider = MockAIProvider::new().with_response("# Title\n\nBody text\n| a | b |");

        let compilation = handler(&provider, GatewayPolicy::default())
            .compile(answers())
            .await;

        assert!(compilation.is_ready());
        let report = compilation.report();
        assert_eq!(report.answers(), &answers());
        assert_eq!(
            report.blocks(),
            &[
                ReportBlock::Title("Title".into()),
                ReportBlock::Blank,
                ReportBlock::Paragraph("Body text".into()),
                ReportBlock::TableRow("| a | b |".into()),
            ]
        );
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn failure_yields_empty_narrative_and_error() {
        let provider = MockAIProvider::new().with_error(AIError::unavailable("overloaded"));

        let compilation = handler(&provider, GatewayPolicy::default())
            .compile(answers())
            .await;

        assert!(matches!(compilation.error(), Some(GatewayError::Provider(_))));
        let report = compilation.into_report();
        assert_eq!(report.narrative_text(), "");
        assert!(!report.has_narrative());
        assert_eq!(report.answers(), &answers());
        assert_eq!(report.execution_log().entries().count(), EXECUTION_DAYS);
        assert_eq!(report.execution_log().recorded_days(), 0);
    }

    #[tokio::test]
    async fn blank_narrative_is_a_failure() {
        let provider = MockAIProvider::new().with_response("   ");

        let compilation = handler(&provider, GatewayPolicy::default())
            .compile(answers())
            .await;

        assert_eq!(compilation.error(), Some(&GatewayError::EmptyResponse));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_generation_times_out() {
        let provider = MockAIProvider::new()
            .with_response("# Late")
            .with_delay(Duration::from_secs(300));
        let policy = GatewayPolicy::new(Some(Duration::from_secs(30)), "sorry");

        let compilation = handler(&provider, policy).compile(answers()).await;

        assert_eq!(
            compilation.error(),
            Some(&GatewayError::Timeout { timeout_secs: 30 })
        );
        assert!(!compilation.report().has_narrative());
    }
}
