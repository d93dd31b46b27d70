//! Common imports for most toolloop applications.

pub use crate::{
    AgentConfig, ConfigError, ConfigErrorKind, build_agent_with_provider,
    build_agent_with_registry, build_ollama_agent, build_ollama_provider,
};
pub use crate::{DateFeedback, date_feedback};
pub use crate::{
    AgentError, AgentErrorKind, AgentOutcome, AgentPhase, AgentSettings, AgentTurnRequest,
    AnswerPath, Message, ModelProvider, Role, Tool, ToolAgent, ToolDefinition, ToolError,
    ToolFailurePolicy, ToolRegistry,
};
pub use crate::{tl_messages, tl_msg};
