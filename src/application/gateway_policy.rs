//! Timeout and fallback policy applied around gateway calls.

use std::future::Future;
use std::time::Duration;

use crate::config::CoachingConfig;
use crate::domain::coaching::FALLBACK_REPLY;
use crate::ports::GatewayError;

/// How long a gateway call may take and what the coach says when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayPolicy {
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub fallback_message: String,
}

impl GatewayPolicy {
    pub fn new(timeout: Option<Duration>, fallback_message: impl Into<String>) -> Self {
        Self {
            timeout,
            fallback_message: fallback_message.into(),
        }
    }

    /// Runs a gateway call under the timeout.
    pub async fn run<F, T>(&self, call: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GatewayError::Timeout {
                    timeout_secs: whole_seconds_up(limit),
                })?,
            None => call.await,
        }
    }
}

/// Reported limits never read as `0s`.
fn whole_seconds_up(limit: Duration) -> u64 {
    limit.as_secs() + u64::from(limit.subsec_nanos() > 0)
}

impl Default for GatewayPolicy {
    fn default() -> Self {
        Self::new(Some(Duration::from_secs(90)), FALLBACK_REPLY)
    }
}

impl From<&CoachingConfig> for GatewayPolicy {
    fn from(config: &CoachingConfig) -> Self {
        Self::new(config.reply_timeout(), config.fallback_message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_result_through() {
        let policy = GatewayPolicy::default();
        let result = policy.run(async { Ok::<_, GatewayError>("reply") }).await;
        assert_eq!(result, Ok("reply"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let policy = GatewayPolicy::new(Some(Duration::from_secs(5)), "sorry");
        let result = policy
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, GatewayError>("late")
            })
            .await;
        assert_eq!(result, Err(GatewayError::Timeout { timeout_secs: 5 }));
    }

    #[tokio::test(start_paused = true)]
    async fn sub_second_limit_reports_rounded_up() {
        let policy = GatewayPolicy::new(Some(Duration::from_millis(250)), "sorry");
        let result = policy
            .run(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, GatewayError>("late")
            })
            .await;
        assert_eq!(result, Err(GatewayError::Timeout { timeout_secs: 1 }));
        assert_eq!(result.unwrap_err().to_string(), "no reply within 1s");
    }

    #[test]
    fn fractional_limits_round_up() {
        assert_eq!(whole_seconds_up(Duration::from_secs(90)), 90);
        assert_eq!(whole_seconds_up(Duration::from_millis(1500)), 2);
        assert_eq!(whole_seconds_up(Duration::from_millis(1)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_timeout_waits() {
        let policy = GatewayPolicy::new(None, "sorry");
        let result = policy
            .run(async {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok::<_, GatewayError>("eventually")
            })
            .await;
        assert_eq!(result, Ok("eventually"));
    }

    #[test]
    fn built_from_coaching_config() {
        let config = CoachingConfig {
            reply_timeout_secs: 0,
            fallback_message: "Try again".to_string(),
            ..Default::default()
        };
        let policy = GatewayPolicy::from(&config);
        assert_eq!(policy.timeout, None);
        assert_eq!(policy.fallback_message, "Try again");
    }
}
