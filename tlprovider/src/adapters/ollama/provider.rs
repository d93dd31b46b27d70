//! Ollama provider speaking the native `/api/chat` protocol.

use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;

use crate::{
    Message, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, Role,
    StopReason, TokenUsage, ToolArguments, ToolCall, ToolDefinition,
};

use super::transport::{OllamaHttpTransport, OllamaTransport};
use super::types::{
    OllamaChatRequest, OllamaChatResponse, OllamaFunction, OllamaFunctionCall, OllamaMessage,
    OllamaOptions, OllamaTool, OllamaToolCall,
};

#[derive(Debug, Clone)]
pub struct OllamaProvider {
    transport: Arc<dyn OllamaTransport>,
}

impl OllamaProvider {
    pub fn new(transport: Arc<dyn OllamaTransport>) -> Self {
        Self { transport }
    }

    pub fn default_http_transport(client: Client) -> OllamaHttpTransport {
        OllamaHttpTransport::new(client)
    }

    fn build_request(request: ModelRequest) -> OllamaChatRequest {
        OllamaChatRequest {
            model: request.model,
            messages: request.messages.into_iter().map(OllamaMessage::from).collect(),
            tools: request.tools.into_iter().map(OllamaTool::from).collect(),
            stream: false,
            options: OllamaOptions {
                temperature: request.options.temperature,
                num_predict: request.options.max_tokens,
            },
        }
    }
}

impl ModelProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let response = self.transport.chat(Self::build_request(request)).await?;
            ModelResponse::try_from(response)
        })
    }
}

impl From<Message> for OllamaMessage {
    fn from(value: Message) -> Self {
        let tool_name = match value.role {
            Role::Tool => value.name,
            _ => None,
        };

        Self {
            role: value.role.as_str().to_string(),
            content: value.content,
            tool_calls: value
                .tool_calls
                .into_iter()
                .map(|call| OllamaToolCall {
                    id: None,
                    function: OllamaFunctionCall {
                        name: call.name,
                        arguments: Value::Object(call.arguments),
                    },
                })
                .collect(),
            tool_name,
        }
    }
}

impl From<ToolDefinition> for OllamaTool {
    fn from(value: ToolDefinition) -> Self {
        Self {
            kind: "function".to_string(),
            function: OllamaFunction {
                name: value.name,
                description: value.description,
                parameters: value.parameters,
            },
        }
    }
}

impl TryFrom<OllamaChatResponse> for ModelResponse {
    type Error = ProviderError;

    fn try_from(value: OllamaChatResponse) -> Result<Self, Self::Error> {
        let role = parse_role(&value.message.role)?;
        let tool_calls = value
            .message
            .tool_calls
            .into_iter()
            .enumerate()
            .map(|(index, call)| {
                let arguments = normalize_arguments(&call.function.name, call.function.arguments)?;
                let id = call.id.unwrap_or_else(|| format!("call_{index}"));
                Ok(ToolCall::new(id, call.function.name, arguments))
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        let has_tool_calls = !tool_calls.is_empty();
        let message = Message::new(role, value.message.content).with_tool_calls(tool_calls);
        let usage = TokenUsage::new(
            value.prompt_eval_count.unwrap_or(0),
            value.eval_count.unwrap_or(0),
        );

        Ok(ModelResponse::new(value.model, message)
            .with_stop_reason(parse_stop_reason(
                value.done_reason.as_deref(),
                has_tool_calls,
            ))
            .with_usage(usage))
    }
}

fn parse_role(value: &str) -> Result<Role, ProviderError> {
    match value {
        "assistant" | "" => Ok(Role::Assistant),
        "system" => Ok(Role::System),
        "user" => Ok(Role::User),
        "tool" => Ok(Role::Tool),
        other => Err(ProviderError::transport(format!(
            "Ollama response carried unknown role '{other}'"
        ))),
    }
}

fn parse_stop_reason(value: Option<&str>, has_tool_calls: bool) -> StopReason {
    if has_tool_calls {
        return StopReason::ToolUse;
    }

    match value {
        Some("stop") | None => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        Some("unload") => StopReason::Cancelled,
        Some(_) => StopReason::Other,
    }
}

fn normalize_arguments(tool_name: &str, value: Value) -> Result<ToolArguments, ProviderError> {
    let malformed = || {
        ProviderError::transport(format!(
            "tool call '{tool_name}' carried arguments that are not a JSON object"
        ))
    };

    match value {
        Value::Object(arguments) => Ok(arguments),
        Value::Null => Ok(ToolArguments::new()),
        Value::String(raw) if raw.trim().is_empty() => Ok(ToolArguments::new()),
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(arguments)) => Ok(arguments),
            _ => Err(malformed()),
        },
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalize_arguments_accepts_objects_strings_and_null() {
        let from_object = normalize_arguments("t", json!({"expression": "1+1"}))
            .expect("object arguments should pass through");
        assert_eq!(from_object.get("expression"), Some(&json!("1+1")));

        let from_string = normalize_arguments("t", json!("{\"format\":\"12h\"}"))
            .expect("encoded arguments should decode");
        assert_eq!(from_string.get("format"), Some(&json!("12h")));

        assert!(normalize_arguments("t", Value::Null)
            .expect("null means no arguments")
            .is_empty());
        assert!(normalize_arguments("t", json!(""))
            .expect("blank string means no arguments")
            .is_empty());
    }

    #[test]
    fn normalize_arguments_rejects_non_objects() {
        let error = normalize_arguments("evaluate_arithmetic", json!([1, 2]))
            .expect_err("array arguments must fail");
        assert!(error.message.contains("evaluate_arithmetic"));

        assert!(normalize_arguments("t", json!("not json")).is_err());
        assert!(normalize_arguments("t", json!("[1]")).is_err());
    }

    #[test]
    fn stop_reason_prefers_tool_use_when_calls_present() {
        assert_eq!(parse_stop_reason(Some("stop"), true), StopReason::ToolUse);
        assert_eq!(parse_stop_reason(Some("stop"), false), StopReason::EndTurn);
        assert_eq!(parse_stop_reason(Some("length"), false), StopReason::MaxTokens);
        assert_eq!(parse_stop_reason(None, false), StopReason::EndTurn);
        assert_eq!(parse_stop_reason(Some("load"), false), StopReason::Other);
    }

    #[test]
    fn tool_role_messages_carry_tool_name_only_for_tool_role() {
        let tool = OllamaMessage::from(Message::tool("evaluate_arithmetic", "8"));
        assert_eq!(tool.tool_name.as_deref(), Some("evaluate_arithmetic"));

        let user = OllamaMessage::from(Message::user("hi").with_name("ignored"));
        assert_eq!(user.tool_name, None);
    }
}
