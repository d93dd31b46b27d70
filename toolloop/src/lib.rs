//! Single-round tool-calling agent over a local Ollama chat endpoint.
//!
//! This crate is the single dependency for most applications: it re-exports
//! the workspace crates and wires them together from an [`AgentConfig`].
//!
//! ```rust,no_run
//! use toolloop::{AgentConfig, build_ollama_agent};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let agent = build_ollama_agent(&AgentConfig::from_env()?)?;
//! let answer = agent.process_query("What is 1 + 3/(25+7)^2?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

mod macros;

pub mod config;
pub mod feedback;
pub mod prelude;
pub mod runtime;

pub use tlagent;
pub use tlcommon;
pub use tlobserve;
pub use tlprovider;
pub use tltooling;

pub use config::{AgentConfig, ConfigError, ConfigErrorKind};
pub use feedback::{DATE_QUERY, DateFeedback, date_feedback, date_feedback_for};
pub use runtime::{
    build_agent_with_provider, build_agent_with_registry, build_ollama_agent,
    build_ollama_provider, default_agent_hooks, default_tool_hooks,
};

pub use tlagent::{
    AgentError, AgentErrorKind, AgentHooks, AgentOutcome, AgentPhase, AgentSettings,
    AgentTurnRequest, AnswerPath, NoopAgentHooks, SkippedToolCall, ToolAgent, ToolAgentBuilder,
    ToolFailurePolicy,
};
pub use tlcommon::{BoxFuture, GenerationOptions};
pub use tlobserve::{
    FanoutAgentHooks, FanoutToolHooks, MetricsObservabilityHooks, SafeAgentHooks, SafeToolHooks,
    TracingObservabilityHooks,
};
pub use tlprovider::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderError,
    ProviderErrorKind, ProviderFuture, Role, StopReason, TokenUsage, ToolArguments, ToolCall,
    ToolDefinition,
};
pub use tltooling::{
    ArithmeticTool, ClockTool, DefaultToolRuntime, FunctionTool, NoopToolRuntimeHooks, Tool,
    ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry,
    ToolRuntime, ToolRuntimeHooks,
};
