//! Agent settings, turn requests and turn outcomes.

use tlcommon::GenerationOptions;
use tlprovider::{Message, TokenUsage, ToolCall};
use tltooling::{ToolError, ToolExecutionResult};

pub const DEFAULT_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// What to do when the model asked for tools and every call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolFailurePolicy {
    /// Answer with the content of the initial model message.
    #[default]
    ReturnModelContent,
    /// Fail the turn with `AgentErrorKind::NoUsableTool`.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentSettings {
    pub model: String,
    pub options: GenerationOptions,
    /// Prepended as a system message when set. None by default.
    pub system_prompt: Option<String>,
    pub tool_failure_policy: ToolFailurePolicy,
}

impl AgentSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_tool_failure_policy(mut self, policy: ToolFailurePolicy) -> Self {
        self.tool_failure_policy = policy;
        self
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            options: GenerationOptions::default().with_temperature(DEFAULT_TEMPERATURE),
            system_prompt: None,
            tool_failure_policy: ToolFailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentTurnRequest {
    pub query: String,
    /// Earlier conversation, oldest first. Sent ahead of the query.
    pub history: Vec<Message>,
}

impl AgentTurnRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerPath {
    /// The model answered without requesting a tool.
    Direct,
    /// A tool ran and the follow-up response is the answer.
    ToolResult,
    /// Every requested tool failed; the initial content is the answer.
    ToolFailureFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedToolCall {
    pub call: ToolCall,
    pub error: ToolError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome {
    pub answer: String,
    pub path: AnswerPath,
    pub executed_tool: Option<ToolExecutionResult>,
    pub skipped_calls: Vec<SkippedToolCall>,
    /// Summed over every backend call of the turn.
    pub usage: TokenUsage,
    pub model_calls: u32,
}
