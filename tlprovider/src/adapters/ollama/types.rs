//! Ollama `/api/chat` wire payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<OllamaTool>,
    pub stream: bool,
    #[serde(skip_serializing_if = "OllamaOptions::is_empty")]
    pub options: OllamaOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tool_calls: Vec<OllamaToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub function: OllamaFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    pub name: String,
    /// Usually an object; some models emit a JSON-encoded string or nothing.
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: OllamaFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

impl OllamaOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.num_predict.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OllamaChatResponse {
    #[serde(default)]
    pub model: String,
    pub message: OllamaMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OllamaErrorBody {
    pub error: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_omits_empty_tools_and_options() {
        let request = OllamaChatRequest {
            model: "llama3.1:8b".to_string(),
            messages: vec![OllamaMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
                tool_calls: Vec::new(),
                tool_name: None,
            }],
            tools: Vec::new(),
            stream: false,
            options: OllamaOptions::default(),
        };

        let encoded = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(
            encoded,
            json!({
                "model": "llama3.1:8b",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false
            })
        );
    }

    #[test]
    fn response_tolerates_missing_and_null_tool_calls() {
        let missing: OllamaChatResponse = serde_json::from_str(
            r#"{"model":"m","message":{"role":"assistant","content":"hello"},"done":true}"#,
        )
        .expect("missing tool_calls should parse");
        assert!(missing.message.tool_calls.is_empty());
        assert_eq!(missing.done_reason, None);

        let null: OllamaChatResponse = serde_json::from_str(
            r#"{"model":"m","message":{"role":"assistant","content":null,"tool_calls":null}}"#,
        )
        .expect("null fields should parse");
        assert!(null.message.tool_calls.is_empty());
        assert_eq!(null.message.content, "");
    }

    #[test]
    fn response_parses_native_tool_call_shape() {
        let parsed: OllamaChatResponse = serde_json::from_value(json!({
            "model": "llama3.1:8b",
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [
                    {"function": {"name": "evaluate_arithmetic", "arguments": {"expression": "2^3"}}}
                ]
            },
            "done_reason": "stop",
            "prompt_eval_count": 120,
            "eval_count": 18
        }))
        .expect("tool call response should parse");

        let call = &parsed.message.tool_calls[0];
        assert_eq!(call.id, None);
        assert_eq!(call.function.name, "evaluate_arithmetic");
        assert_eq!(call.function.arguments, json!({"expression": "2^3"}));
        assert_eq!(parsed.prompt_eval_count, Some(120));
        assert_eq!(parsed.eval_count, Some(18));
    }
}
