//! Action Executor
//!
//! Executes the backend calls of an approved ActionPlan.
//!
//! Responsibilities:
//! - one HTTP request per ApiCallSpec, sequential in plan order
//! - containment: a transport failure on one call degrades that call's
//!   outcome and never aborts the rest of the batch
//! - any HTTP status is a structurally valid response; callers judge
//!   success from the surfaced body
//!
//! The transport seam exists so tests and demos can execute plans without a
//! network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use automate_catalog::HttpMethod;

use crate::plan::{ActionPlan, ApiCallSpec};

/// Transport-level failure (DNS, connection refused, timeout).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(String),
}

/// Raw response of a single backend call, any status included.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP transport seam for the executor.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, call: &ApiCallSpec) -> Result<TransportResponse, TransportError>;
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Production transport backed by `reqwest`, with an explicit bounded
/// timeout per call.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Default per-call timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT_SECS).unwrap_or_else(|_| Self {
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, call: &ApiCallSpec) -> Result<TransportResponse, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut request = self
            .client
            .request(to_reqwest_method(call.method), &call.endpoint)
            .headers(headers);
        if let Some(payload) = &call.payload {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Per-call execution record.
///
/// `status`/`body` are set after any HTTP response; `error` is set instead
/// when the call failed at the transport level.
#[derive(Debug, Clone, Serialize)]
pub struct CallOutcome {
    pub call: ApiCallSpec,
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub error: Option<String>,
}

impl CallOutcome {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of executing a plan: the plan itself plus one record per call.
///
/// A plan with no calls yields an outcome with an empty record list — the
/// pure no-op acknowledgment that still surfaces the plan's response text.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutcome {
    pub plan: ActionPlan,
    pub calls: Vec<CallOutcome>,
}

impl ExecutionOutcome {
    /// Whether the plan warranted no backend call at all.
    pub fn is_noop(&self) -> bool {
        self.calls.is_empty()
    }

    /// Status of the first call, for the common single-call case.
    pub fn first_status(&self) -> Option<u16> {
        self.calls.first().and_then(|c| c.status)
    }

    /// The message to display: the plan's response text, with one line per
    /// transport failure appended so a degraded call is never silent.
    pub fn user_message(&self) -> String {
        let mut message = self.plan.response_text().to_string();
        for outcome in &self.calls {
            if let Some(error) = &outcome.error {
                message.push_str(&format!(
                    "\nThe call to {} could not be completed: {}",
                    outcome.call.endpoint, error
                ));
            }
        }
        message
    }
}

/// The executor. Stateless apart from its transport.
pub struct PlanExecutor<T: HttpTransport> {
    transport: T,
}

impl<T: HttpTransport> PlanExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Execute an approved plan.
    ///
    /// Issues exactly one request per proposed call, in plan order. Never
    /// raises: transport failures are contained in the per-call records.
    pub async fn execute(&self, plan: ActionPlan) -> ExecutionOutcome {
        let specs: Vec<ApiCallSpec> = plan.api_calls().into_iter().cloned().collect();
        if specs.is_empty() {
            info!("plan has no backend call, acknowledging without network");
            return ExecutionOutcome {
                plan,
                calls: Vec::new(),
            };
        }

        let mut calls = Vec::with_capacity(specs.len());
        for spec in specs {
            match self.transport.send(&spec).await {
                Ok(response) => {
                    info!(
                        method = %spec.method,
                        endpoint = %spec.endpoint,
                        status = response.status,
                        "backend call completed"
                    );
                    calls.push(CallOutcome {
                        body: parse_body(&response.body),
                        status: Some(response.status),
                        error: None,
                        call: spec,
                    });
                }
                Err(error) => {
                    warn!(
                        method = %spec.method,
                        endpoint = %spec.endpoint,
                        %error,
                        "backend call failed at transport level, continuing"
                    );
                    calls.push(CallOutcome {
                        status: None,
                        body: None,
                        error: Some(error.to_string()),
                        call: spec,
                    });
                }
            }
        }

        ExecutionOutcome { plan, calls }
    }
}

/// Parse a response body as JSON, keeping it as a raw string value when it
/// is not JSON. Empty bodies attach nothing.
fn parse_body(body: &str) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;

    use crate::plan::{CommandPlan, ImagePlan};

    /// Records call order and replays scripted responses.
    struct RecordingTransport {
        log: Mutex<Vec<String>>,
        script: Mutex<Vec<Result<TransportResponse, TransportError>>>,
    }

    impl RecordingTransport {
        fn new(script: Vec<Result<TransportResponse, TransportError>>) -> Self {
            Self {
                log: Mutex::new(Vec::new()),
                script: Mutex::new(script),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn send(&self, call: &ApiCallSpec) -> Result<TransportResponse, TransportError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{} {}", call.method, call.endpoint));
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Ok(TransportResponse {
                    status: 200,
                    body: String::new(),
                });
            }
            script.remove(0)
        }
    }

    fn ok(status: u16, body: &str) -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse {
            status,
            body: body.to_string(),
        })
    }

    fn image_plan_with_calls(calls: Vec<ApiCallSpec>) -> ActionPlan {
        let mut plan = ImagePlan::parse_fallback();
        plan.response_text = "Processed the image.".to_string();
        plan.api_calls = calls;
        ActionPlan::Image(plan)
    }

    #[test]
    fn test_null_api_call_issues_zero_requests() {
        tokio_test::block_on(async {
            let transport = RecordingTransport::new(Vec::new());
            let executor = PlanExecutor::new(transport);
            let plan = ActionPlan::Command(CommandPlan::parse_fallback());

            let outcome = executor.execute(plan).await;

            assert!(outcome.is_noop());
            assert!(outcome.first_status().is_none());
            assert!(outcome.calls.iter().all(|c| c.error.is_none()));
            assert_eq!(executor.transport.calls().len(), 0);
            assert_eq!(
                outcome.user_message(),
                CommandPlan::parse_fallback().response_text
            );
        });
    }

    #[test]
    fn test_multi_call_plan_executes_in_order() {
        tokio_test::block_on(async {
            let transport = RecordingTransport::new(vec![ok(200, "{}"), ok(201, "{}")]);
            let executor = PlanExecutor::new(transport);
            let plan = image_plan_with_calls(vec![
                ApiCallSpec::new("https://api.example/x", HttpMethod::Post),
                ApiCallSpec::new("https://api.example/y", HttpMethod::Post),
            ]);

            let outcome = executor.execute(plan).await;

            assert_eq!(
                executor.transport.calls(),
                vec![
                    "POST https://api.example/x".to_string(),
                    "POST https://api.example/y".to_string(),
                ]
            );
            assert_eq!(outcome.calls.len(), 2);
            assert_eq!(outcome.calls[0].status, Some(200));
            assert_eq!(outcome.calls[1].status, Some(201));
        });
    }

    #[test]
    fn test_transport_failure_is_contained_per_call() {
        tokio_test::block_on(async {
            let transport = RecordingTransport::new(vec![
                Err(TransportError::Http("connection refused".to_string())),
                ok(200, r#"{"success":true}"#),
            ]);
            let executor = PlanExecutor::new(transport);
            let plan = image_plan_with_calls(vec![
                ApiCallSpec::new("https://api.example/a", HttpMethod::Post),
                ApiCallSpec::new("https://api.example/b", HttpMethod::Post),
            ]);

            let outcome = executor.execute(plan).await;

            // Both calls attempted despite the first failing.
            assert_eq!(executor.transport.calls().len(), 2);
            assert!(outcome.calls[0].failed());
            assert!(outcome.calls[0].status.is_none());
            assert!(outcome.calls[0].body.is_none());
            assert!(!outcome.calls[1].failed());
            assert_eq!(outcome.calls[1].body, Some(json!({"success": true})));

            let message = outcome.user_message();
            assert!(message.starts_with("Processed the image."));
            assert!(message.contains("https://api.example/a"));
            assert!(message.contains("connection refused"));
        });
    }

    #[test]
    fn test_non_2xx_status_is_not_a_failure() {
        tokio_test::block_on(async {
            let transport =
                RecordingTransport::new(vec![ok(422, r#"{"success":false,"error":"bad sku"}"#)]);
            let executor = PlanExecutor::new(transport);
            let mut command = CommandPlan::parse_fallback();
            command.response_text = "Creating the product.".to_string();
            command.api_call = Some(ApiCallSpec::new(
                "https://api.example/products",
                HttpMethod::Post,
            ));

            let outcome = executor.execute(ActionPlan::Command(command)).await;

            assert_eq!(outcome.first_status(), Some(422));
            assert!(!outcome.calls[0].failed());
            assert_eq!(outcome.calls[0].body, Some(json!({"success": false, "error": "bad sku"})));
        });
    }

    #[test]
    fn test_non_json_body_is_kept_raw() {
        assert_eq!(
            parse_body("plain text response"),
            Some(Value::String("plain text response".to_string()))
        );
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("[1,2]"), Some(json!([1, 2])));
    }
}
