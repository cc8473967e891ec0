//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-generation providers (Gemini, mock)
//! - `gateway` - Prompt-building generation gateway over a provider

pub mod ai;
pub mod gateway;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider};
pub use gateway::{AIGenerationGateway, GenerationSettings};
