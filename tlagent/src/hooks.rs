//! Lifecycle hooks for agent turns.
//!
//! Tool execution events are reported separately through
//! [`tltooling::ToolRuntimeHooks`] on the tool runtime.
//!
//! ```rust
//! use tlagent::{AgentHooks, NoopAgentHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn AgentHooks) {}
//!
//! assert_hooks_trait(&NoopAgentHooks);
//! ```

use std::time::Duration;

use tlprovider::{ModelRequest, ModelResponse, ProviderError, ToolCall};
use tltooling::ToolError;

use crate::{AgentOutcome, AgentPhase};

pub trait AgentHooks: Send + Sync {
    fn on_model_request(&self, _phase: AgentPhase, _request: &ModelRequest) {}

    fn on_model_response(&self, _phase: AgentPhase, _response: &ModelResponse, _elapsed: Duration) {
    }

    fn on_model_failure(&self, _phase: AgentPhase, _error: &ProviderError, _elapsed: Duration) {}

    fn on_tool_skipped(&self, _tool_call: &ToolCall, _error: &ToolError) {}

    fn on_turn_complete(&self, _outcome: &AgentOutcome, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAgentHooks;

impl AgentHooks for NoopAgentHooks {}
