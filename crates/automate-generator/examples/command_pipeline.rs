//! End-to-end command pipeline example, no network required.
//!
//! This example demonstrates:
//! - Building the endpoint catalog and a session
//! - Generating a plan from a text command (mock LLM backend)
//! - Gating execution behind explicit approval
//! - Executing the approved plan through a stub transport

use async_trait::async_trait;

use automate_catalog::builtin_catalog;
use automate_core::prelude::*;
use automate_generator::{LlmGenerator, MockLlmClient};

/// Stub transport standing in for the store backend.
struct StaticTransport;

#[async_trait]
impl HttpTransport for StaticTransport {
    async fn send(&self, call: &ApiCallSpec) -> Result<TransportResponse, TransportError> {
        println!("  -> {} {}", call.method, call.endpoint);
        Ok(TransportResponse {
            status: 200,
            body: r#"{"success":true,"data":[{"name":"Espresso beans","stock":42}]}"#.to_string(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== AutoMate Command Pipeline Example ===\n");

    let catalog = builtin_catalog("https://api.example");
    let mut session = AutomateSession::new();
    session.select_domain("products");

    // A canned model reply; swap MockLlmClient for a configured GeminiClient
    // (see automate_generator::build_gemini_generator) against the live API.
    let generator = LlmGenerator::new(MockLlmClient::new(
        r#"{
            "intent": "list products with stock levels",
            "action": "products.list",
            "parameters": {},
            "apiCall": {"endpoint": "https://api.example/products", "method": "GET", "payload": null},
            "response": "Here are all your products and their stock levels."
        }"#,
    ));

    session.set_text("show me all products and their stock levels");
    let input = session.resolve_input().expect("an input was buffered");
    session.handle_command(&generator, &catalog, input).await?;

    let pending = session.pending_plan().expect("a plan is pending");
    println!("Proposed plan: {}", pending.response_text());
    println!("Proposed calls: {}", pending.api_calls().len());
    println!("Mutating: {}\n", pending.is_mutating());

    // Nothing has touched the network yet; approval is the only path there.
    println!("Approving plan...");
    let executor = PlanExecutor::new(StaticTransport);
    let outcome = session.approve_pending(&executor).await?;
    println!(
        "Executed {} call(s), first status {:?}\n",
        outcome.calls.len(),
        outcome.first_status()
    );

    println!("--- Conversation log ---");
    for message in session.transcript().entries() {
        println!("[{:?}] {}", message.role, message.content);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
