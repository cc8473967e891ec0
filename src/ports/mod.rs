//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Raw text-generation provider (Gemini, mock)
//! - `GenerationGateway` - Coach-turn and final-report requests built on a provider

mod ai_provider;
mod generation_gateway;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, RequestPurpose, TokenUsage,
};
pub use generation_gateway::{GatewayError, GenerationGateway};
