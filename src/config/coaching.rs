//! Coaching flow configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::coaching::FALLBACK_REPLY;

/// Settings for how the coach talks and how long it may take
#[derive(Debug, Clone, Deserialize)]
pub struct CoachingConfig {
    /// Seconds a gateway call may take before it counts as failed; 0 disables
    #[serde(default = "default_reply_timeout")]
    pub reply_timeout_secs: u64,

    /// Language the coach and the report are written in
    #[serde(default = "default_language")]
    pub reply_language: String,

    /// Coach turn substituted when generation fails
    #[serde(default = "default_fallback")]
    pub fallback_message: String,
}

impl CoachingConfig {
    /// Reply timeout, `None` when disabled
    pub fn reply_timeout(&self) -> Option<Duration> {
        match self.reply_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Validate coaching configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reply_language.trim().is_empty() {
            return Err(ValidationError::EmptyReplyLanguage);
        }
        if self.fallback_message.trim().is_empty() {
            return Err(ValidationError::EmptyFallbackMessage);
        }
        Ok(())
    }
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            reply_timeout_secs: default_reply_timeout(),
            reply_language: default_language(),
            fallback_message: default_fallback(),
        }
    }
}

fn default_reply_timeout() -> u64 {
    90
}

fn default_language() -> String {
    "English".to_string()
}

fn default_fallback() -> String {
    FALLBACK_REPLY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coaching_defaults() {
        let config = CoachingConfig::default();
        assert_eq!(config.reply_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.reply_language, "English");
        assert_eq!(config.fallback_message, FALLBACK_REPLY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = CoachingConfig {
            reply_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.reply_timeout(), None);
    }

    #[test]
    fn test_blank_values_rejected() {
        let config = CoachingConfig {
            fallback_message: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyFallbackMessage));

        let config = CoachingConfig {
            reply_language: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyReplyLanguage));
    }
}
