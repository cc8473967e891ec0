//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WOOP_COACH` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use woop_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Coaching with {}", config.ai.model);
//! ```

mod ai;
mod coaching;
mod error;

pub use ai::{AiConfig, AiProviderKind};
pub use coaching::CoachingConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the Gemini API key is required when the
/// Gemini provider is selected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Text-generation provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Coaching flow configuration (timeouts, language, fallback)
    #[serde(default)]
    pub coaching: CoachingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WOOP_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WOOP_COACH__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `WOOP_COACH__COACHING__REPLY_TIMEOUT_SECS=30` -> `coaching.reply_timeout_secs = 30`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WOOP_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.coaching.validate()?;
        Ok(())
    }
}
