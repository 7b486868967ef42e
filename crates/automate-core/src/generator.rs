//! Generator seam
//!
//! The Action Generator turns a command into an ActionPlan by delegating to
//! a generative-language backend. Implementations live outside this crate;
//! the pipeline only depends on this trait.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use automate_catalog::EndpointCatalog;

use crate::input::CommandInput;
use crate::plan::{ActionPlan, CommandPlan, ImagePlan};

/// Generator-side failures.
///
/// These never surface to the user as faults: [`Generator::generate`]
/// absorbs them into a fallback plan. The fallible path is exposed for
/// callers that want the taxonomy.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The language-model backend call failed (network/auth/rate limit) or
    /// its response was missing the expected content path.
    #[error("generation backend error: {0}")]
    Backend(String),

    /// The model replied, but no structured JSON could be located in the
    /// output.
    #[error("model output did not contain structured JSON")]
    MissingJson,

    /// JSON was extracted but violates the expected plan shape.
    #[error("schema coercion failed: {0}")]
    Coercion(String),
}

/// Action Generator contract.
///
/// Exactly one outbound backend call per invocation, no local state
/// mutation beyond the returned plan.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Fallible generation; see [`GenerationError`] for the failure modes.
    async fn try_generate(
        &self,
        input: &CommandInput,
        domain_area: &str,
        catalog: &EndpointCatalog,
    ) -> Result<ActionPlan, GenerationError>;

    /// Infallible generation: every failure degrades to the fallback plan
    /// matching the input shape, so the caller always has something to show.
    async fn generate(
        &self,
        input: &CommandInput,
        domain_area: &str,
        catalog: &EndpointCatalog,
    ) -> ActionPlan {
        match self.try_generate(input, domain_area, catalog).await {
            Ok(plan) => plan,
            Err(error) => {
                warn!(
                    input_kind = input.kind(),
                    domain_area,
                    %error,
                    "plan generation failed, returning fallback plan"
                );
                fallback_for(input)
            }
        }
    }
}

/// The fallback plan matching an input's shape.
pub fn fallback_for(input: &CommandInput) -> ActionPlan {
    match input {
        CommandInput::Image { .. } => ActionPlan::Image(ImagePlan::parse_fallback()),
        CommandInput::Voice { .. } | CommandInput::Text { .. } => {
            ActionPlan::Command(CommandPlan::parse_fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFailing;

    #[async_trait]
    impl Generator for AlwaysFailing {
        async fn try_generate(
            &self,
            _input: &CommandInput,
            _domain_area: &str,
            _catalog: &EndpointCatalog,
        ) -> Result<ActionPlan, GenerationError> {
            Err(GenerationError::Backend("connection refused".to_string()))
        }
    }

    #[test]
    fn test_generate_degrades_to_fallback_per_input_shape() {
        tokio_test::block_on(async {
            let generator = AlwaysFailing;
            let catalog = EndpointCatalog::new();

            let plan = generator
                .generate(&CommandInput::text("do something"), "products", &catalog)
                .await;
            assert!(matches!(plan, ActionPlan::Command(ref p) if p.action == "parse_error"));
            assert!(!plan.has_calls());

            let plan = generator
                .generate(&CommandInput::image(vec![0u8; 4]), "products", &catalog)
                .await;
            assert!(matches!(plan, ActionPlan::Image(_)));
            assert!(!plan.has_calls());
        });
    }
}
