//! Configuration loading example.
//!
//! Loads `automate.yaml` (path can be overridden by the first argument) and
//! prints the effective settings.

use automate_config::load_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "automate.yaml".to_string());

    let config = load_config(std::path::Path::new(&path))?;

    println!("app:        {} ({})", config.app.name, config.app.environment);
    println!("backend:    {} (timeout {}s)", config.backend.base_url, config.backend.timeout_secs);
    println!(
        "generator:  {} @ {} (temperature {}, topK {}, topP {}, max tokens {})",
        config.generator.model,
        config.generator.endpoint,
        config.generator.temperature,
        config.generator.top_k,
        config.generator.top_p,
        config.generator.max_output_tokens,
    );
    println!("api key:    ${}", config.generator.api_key_env);
    println!("log level:  {}", config.observability.log_level);

    Ok(())
}
