//! Generator factory for building the LLM-backed generator from
//! configuration.

use thiserror::Error;

use automate_config::GeneratorConfig;

use crate::gemini::{GeminiClient, GeminiClientConfig};
use crate::generator::LlmGenerator;

/// Errors that can occur when building a generator.
#[derive(Debug, Error)]
pub enum GeneratorBuildError {
    #[error("environment variable '{0}' not found")]
    EnvNotFound(String),
    #[error("client build error: {0}")]
    Client(String),
}

/// Build a Gemini-backed generator from the configuration section, resolving
/// the API key from the configured environment variable.
pub fn build_gemini_generator(
    config: &GeneratorConfig,
) -> Result<LlmGenerator<GeminiClient>, GeneratorBuildError> {
    let api_key = resolve_api_key(config)?;
    let client = GeminiClient::new(GeminiClientConfig {
        api_key,
        model: config.model.clone(),
        endpoint: config.endpoint.clone(),
        temperature: config.temperature,
        top_k: config.top_k,
        top_p: config.top_p,
        max_output_tokens: config.max_output_tokens,
        timeout_secs: config.timeout_secs,
    })
    .map_err(|e| GeneratorBuildError::Client(e.to_string()))?;
    Ok(LlmGenerator::new(client))
}

fn resolve_api_key(config: &GeneratorConfig) -> Result<String, GeneratorBuildError> {
    std::env::var(&config.api_key_env)
        .map_err(|_| GeneratorBuildError::EnvNotFound(config.api_key_env.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_var() {
        let config = GeneratorConfig {
            api_key_env: "AUTOMATE_TEST_KEY_THAT_IS_UNSET".to_string(),
            ..GeneratorConfig::default()
        };
        let result = build_gemini_generator(&config);
        assert!(matches!(result, Err(GeneratorBuildError::EnvNotFound(_))));
    }

    #[test]
    fn test_builds_when_env_var_present() {
        let config = GeneratorConfig {
            api_key_env: "AUTOMATE_TEST_KEY_SET".to_string(),
            ..GeneratorConfig::default()
        };
        std::env::set_var("AUTOMATE_TEST_KEY_SET", "dummy");
        let result = build_gemini_generator(&config);
        std::env::remove_var("AUTOMATE_TEST_KEY_SET");
        assert!(result.is_ok());
    }
}
