//! Generation gateway adapters.
//!
//! - `AIGenerationGateway` - builds coach and report prompts and sends them
//!   through any `AIProvider`

mod ai_generation_gateway;

pub use ai_generation_gateway::{AIGenerationGateway, GenerationSettings};
