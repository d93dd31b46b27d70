//! Tool runtime context and execution result types.

use serde_json::Value;
use tlprovider::{Message, ToolCall};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub tool_call_id: Option<String>,
}

impl ToolExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_call(call: &ToolCall) -> Self {
        Self {
            tool_call_id: Some(call.id.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolExecutionResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub value: Value,
}

impl ToolExecutionResult {
    pub fn new(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            value,
        }
    }

    pub fn from_call(call: &ToolCall, value: Value) -> Self {
        Self::new(call.id.clone(), call.name.clone(), value)
    }

    /// Text handed back to the model: strings verbatim, everything else as
    /// compact JSON (`8`, `2.5`, `{"current_date":"..."}`).
    pub fn output_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Tool-role message tagged with the tool name.
    pub fn into_message(self) -> Message {
        let content = self.output_text();
        Message::tool(self.tool_name, content)
    }
}
