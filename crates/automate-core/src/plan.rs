//! Action plan definitions
//!
//! An ActionPlan is the structured output of the Action Generator: what the
//! system believes the user wants and, optionally, the exact backend call(s)
//! to satisfy it. Plans are ephemeral — displayed and executed, never
//! persisted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use automate_catalog::HttpMethod;

/// A concrete backend call the generator proposes.
///
/// `endpoint` is expected to be fully resolved — the pipeline does not
/// substitute `{id}`-style placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallSpec {
    pub endpoint: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ApiCallSpec {
    pub fn new(endpoint: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Plan shape for voice and text commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPlan {
    pub intent: String,
    pub action: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(rename = "apiCall", default)]
    pub api_call: Option<ApiCallSpec>,
    #[serde(rename = "response")]
    pub response_text: String,
}

impl CommandPlan {
    /// Terminal safety net when model output cannot be coerced into a plan.
    pub fn parse_fallback() -> Self {
        Self {
            intent: "unknown".to_string(),
            action: "parse_error".to_string(),
            parameters: Map::new(),
            api_call: None,
            response_text: "I had trouble understanding your request. Please try again with a clearer command."
                .to_string(),
        }
    }
}

/// Plan shape for image commands, which may propose several calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlan {
    pub analysis: String,
    #[serde(rename = "extractedData", default)]
    pub extracted_data: Map<String, Value>,
    #[serde(rename = "suggestedActions", default)]
    pub suggested_actions: Vec<String>,
    #[serde(rename = "apiCalls", default)]
    pub api_calls: Vec<ApiCallSpec>,
    #[serde(rename = "response")]
    pub response_text: String,
}

impl ImagePlan {
    /// Terminal safety net when image analysis output cannot be coerced.
    pub fn parse_fallback() -> Self {
        Self {
            analysis: "Image analysis failed".to_string(),
            extracted_data: Map::new(),
            suggested_actions: Vec::new(),
            api_calls: Vec::new(),
            response_text: "I had trouble analyzing the image. Please try uploading a clearer image."
                .to_string(),
        }
    }
}

/// The generator's output, in either of its two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionPlan {
    Command(CommandPlan),
    Image(ImagePlan),
}

impl ActionPlan {
    /// The friendly message shown to the user for this plan.
    pub fn response_text(&self) -> &str {
        match self {
            ActionPlan::Command(plan) => &plan.response_text,
            ActionPlan::Image(plan) => &plan.response_text,
        }
    }

    /// The proposed backend calls, in execution order.
    ///
    /// Empty for a plan that warrants no call; such a plan never reaches the
    /// network even when approved.
    pub fn api_calls(&self) -> Vec<&ApiCallSpec> {
        match self {
            ActionPlan::Command(plan) => plan.api_call.iter().collect(),
            ActionPlan::Image(plan) => plan.api_calls.iter().collect(),
        }
    }

    pub fn has_calls(&self) -> bool {
        !self.api_calls().is_empty()
    }

    /// Whether any proposed call mutates backend state.
    pub fn is_mutating(&self) -> bool {
        self.api_calls().iter().any(|call| call.method.is_mutating())
    }
}

impl From<CommandPlan> for ActionPlan {
    fn from(plan: CommandPlan) -> Self {
        ActionPlan::Command(plan)
    }
}

impl From<ImagePlan> for ActionPlan {
    fn from(plan: ImagePlan) -> Self {
        ActionPlan::Image(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_plan_deserializes_wire_field_names() {
        let plan: CommandPlan = serde_json::from_value(json!({
            "intent": "list products",
            "action": "products.list",
            "parameters": {"inStock": true},
            "apiCall": {
                "endpoint": "https://api.example/products",
                "method": "GET",
                "payload": null
            },
            "response": "Here are your products."
        }))
        .unwrap();

        assert_eq!(plan.intent, "list products");
        let call = plan.api_call.unwrap();
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(call.endpoint, "https://api.example/products");
        assert!(call.payload.is_none() || call.payload == Some(Value::Null));
    }

    #[test]
    fn test_command_plan_tolerates_missing_optional_fields() {
        let plan: CommandPlan = serde_json::from_value(json!({
            "intent": "chat",
            "action": "none",
            "response": "Happy to help."
        }))
        .unwrap();
        assert!(plan.parameters.is_empty());
        assert!(plan.api_call.is_none());
    }

    #[test]
    fn test_command_plan_rejects_unknown_method() {
        let result = serde_json::from_value::<CommandPlan>(json!({
            "intent": "patch something",
            "action": "products.update",
            "apiCall": {"endpoint": "https://api.example/products/1", "method": "PATCH"},
            "response": "ok"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_image_plan_call_ordering_preserved() {
        let plan: ImagePlan = serde_json::from_value(json!({
            "analysis": "an invoice",
            "apiCalls": [
                {"endpoint": "https://api.example/suppliers", "method": "POST"},
                {"endpoint": "https://api.example/purchase-orders", "method": "POST"}
            ],
            "response": "Found an invoice."
        }))
        .unwrap();
        let action_plan = ActionPlan::from(plan);
        let endpoints: Vec<_> = action_plan
            .api_calls()
            .iter()
            .map(|c| c.endpoint.as_str())
            .collect();
        assert_eq!(
            endpoints,
            vec![
                "https://api.example/suppliers",
                "https://api.example/purchase-orders"
            ]
        );
        assert!(action_plan.is_mutating());
    }

    #[test]
    fn test_fallback_plans_carry_no_calls() {
        let command = ActionPlan::from(CommandPlan::parse_fallback());
        assert!(!command.has_calls());
        assert_eq!(
            match &command {
                ActionPlan::Command(p) => p.action.as_str(),
                _ => unreachable!(),
            },
            "parse_error"
        );

        let image = ActionPlan::from(ImagePlan::parse_fallback());
        assert!(!image.has_calls());
        assert!(!image.response_text().is_empty());
    }
}
