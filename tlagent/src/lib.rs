//! Tool-calling orchestration over model providers.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tlagent::ToolAgent;
//! use tlprovider::ModelProvider;
//!
//! async fn ask(provider: Arc<dyn ModelProvider>) -> Result<String, tlagent::AgentError> {
//!     let agent = ToolAgent::builder(provider).build();
//!     agent.process_query("What is 2^3?").await
//! }
//! ```

mod agent;
mod error;
mod hooks;
mod types;

pub mod prelude {
    pub use crate::{
        AgentError, AgentErrorKind, AgentHooks, AgentOutcome, AgentPhase, AgentSettings,
        AgentTurnRequest, AnswerPath, NoopAgentHooks, SkippedToolCall, ToolAgent,
        ToolAgentBuilder, ToolFailurePolicy,
    };
    pub use tltooling::{
        DefaultToolRuntime, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolExecutionResult, ToolRegistry, ToolRuntime,
    };
}

pub use agent::{ToolAgent, ToolAgentBuilder};
pub use error::{AgentError, AgentErrorKind, AgentPhase};
pub use hooks::{AgentHooks, NoopAgentHooks};
pub use types::{
    AgentOutcome, AgentSettings, AgentTurnRequest, AnswerPath, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    SkippedToolCall, ToolFailurePolicy,
};
pub use tltooling::{
    DefaultToolRuntime, Tool, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
    ToolRegistry, ToolRuntime,
};
