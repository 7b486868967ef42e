//! # Automate Generator
//!
//! The LLM-backed Action Generator of the AutoMate pipeline: directive
//! construction, the single-turn exchange with the generative backend,
//! structured output extraction, and schema coercion into an ActionPlan.
//!
//! The deterministic pipeline pieces (consent gate, executor, session) live
//! in `automate-core`; this crate only produces plans.

mod extract;
mod factory;
mod gemini;
mod generator;
mod llm;

pub use extract::extract_structured_json;
pub use factory::{build_gemini_generator, GeneratorBuildError};
pub use gemini::{GeminiClient, GeminiClientConfig};
pub use generator::LlmGenerator;
pub use llm::{LlmClient, LlmError, LlmRequest, MockLlmClient};
