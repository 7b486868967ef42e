//! LLM-backed Action Generator
//!
//! Builds the directive, runs the single-turn exchange, extracts the
//! structured output, and coerces it into an ActionPlan. Every failure on
//! that path is recoverable: the [`Generator::generate`] entry point
//! degrades to the fallback plan instead of raising.

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, info};

use automate_catalog::EndpointCatalog;
use automate_core::generator::{GenerationError, Generator};
use automate_core::input::CommandInput;
use automate_core::plan::{ActionPlan, CommandPlan, ImagePlan};

use crate::extract::extract_structured_json;
use crate::llm::{LlmClient, LlmRequest};

const MAX_PROMPT_LOG_CHARS: usize = 4_000;
const MAX_LLM_OUTPUT_LOG_CHARS: usize = 8_000;

/// Action Generator backed by an LLM client.
pub struct LlmGenerator<C: LlmClient> {
    pub client: C,
}

impl<C: LlmClient> LlmGenerator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn build_command_directive(
        &self,
        instruction: &str,
        domain_area: &str,
        catalog: &EndpointCatalog,
    ) -> String {
        let endpoints = catalog_json(catalog);
        format!(
            r#"You are an AI assistant for a business management system.

Available API endpoints:
{endpoints}

The user wants to work with: {domain_area}

Analyze the command and return a JSON response with:
{{
  "intent": "what the user wants to do",
  "action": "specific action to take",
  "parameters": "extracted parameters",
  "apiCall": {{
    "endpoint": "exact API endpoint to call",
    "method": "HTTP method",
    "payload": "request body if needed"
  }},
  "response": "friendly response to user"
}}

Only reference endpoints listed above. If you cannot determine a specific API call, set apiCall to null.
Return only the JSON object.

Command: "{instruction}""#
        )
    }

    fn build_image_directive(
        &self,
        image_base64: &str,
        domain_area: &str,
        catalog: &EndpointCatalog,
    ) -> String {
        let endpoints = catalog_json(catalog);
        format!(
            r#"You are an AI assistant analyzing business documents/images for a management system.

Available API endpoints:
{endpoints}

Context: User is working with {domain_area}

Analyze this image and extract relevant business data. Return JSON with:
{{
  "analysis": "description of what you see",
  "extractedData": "structured data extracted from image",
  "suggestedActions": ["list of suggested actions"],
  "apiCalls": [{{"endpoint": "api to call", "method": "HTTP method", "payload": "data to send"}}],
  "response": "friendly response to user"
}}

Only reference endpoints listed above.
Return only the JSON object.

Image (base64): data:image/jpeg;base64,{image_base64}"#
        )
    }

    async fn complete_and_extract(&self, directive: String) -> Result<String, GenerationError> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                directive = %truncate_for_log(&directive, MAX_PROMPT_LOG_CHARS),
                "generator directive"
            );
        }
        let output = self
            .client
            .complete(LlmRequest::new(directive))
            .await
            .map_err(|e| GenerationError::Backend(e.to_string()))?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                llm_output = %truncate_for_log(&output, MAX_LLM_OUTPUT_LOG_CHARS),
                "generator raw llm output"
            );
        }
        extract_structured_json(&output).ok_or(GenerationError::MissingJson)
    }
}

fn catalog_json(catalog: &EndpointCatalog) -> String {
    // BTreeMap ordering keeps this deterministic run to run.
    serde_json::to_string_pretty(catalog).unwrap_or_else(|_| "{}".to_string())
}

fn truncate_for_log(input: &str, max_chars: usize) -> String {
    let char_count = input.chars().count();
    if char_count <= max_chars {
        return input.to_string();
    }
    let mut preview: String = input.chars().take(max_chars).collect();
    preview.push_str(&format!("... [truncated, total_chars={}]", char_count));
    preview
}

#[async_trait]
impl<C: LlmClient> Generator for LlmGenerator<C> {
    async fn try_generate(
        &self,
        input: &CommandInput,
        domain_area: &str,
        catalog: &EndpointCatalog,
    ) -> Result<ActionPlan, GenerationError> {
        info!(
            input_kind = input.kind(),
            domain_area,
            area_count = catalog.area_count(),
            operation_count = catalog.operation_count(),
            "generator request prepared"
        );

        match input {
            CommandInput::Voice { transcript } => {
                let directive = self.build_command_directive(transcript, domain_area, catalog);
                let json = self.complete_and_extract(directive).await?;
                let plan: CommandPlan = serde_json::from_str(&json)
                    .map_err(|e| GenerationError::Coercion(e.to_string()))?;
                Ok(ActionPlan::Command(plan))
            }
            CommandInput::Text { content } => {
                let directive = self.build_command_directive(content, domain_area, catalog);
                let json = self.complete_and_extract(directive).await?;
                let plan: CommandPlan = serde_json::from_str(&json)
                    .map_err(|e| GenerationError::Coercion(e.to_string()))?;
                Ok(ActionPlan::Command(plan))
            }
            CommandInput::Image { bytes } => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                let directive = self.build_image_directive(&encoded, domain_area, catalog);
                let json = self.complete_and_extract(directive).await?;
                let plan: ImagePlan = serde_json::from_str(&json)
                    .map_err(|e| GenerationError::Coercion(e.to_string()))?;
                Ok(ActionPlan::Image(plan))
            }
        }
    }
}
