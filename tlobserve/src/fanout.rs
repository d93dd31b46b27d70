//! Delivers each callback to several hooks, in insertion order.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tlobserve::{FanoutAgentHooks, MetricsObservabilityHooks, TracingObservabilityHooks};
//!
//! let hooks = FanoutAgentHooks::new()
//!     .with(Arc::new(TracingObservabilityHooks))
//!     .with(Arc::new(MetricsObservabilityHooks));
//! assert_eq!(hooks.len(), 2);
//! ```

use std::sync::Arc;
use std::time::Duration;

use tlagent::{AgentHooks, AgentOutcome, AgentPhase};
use tlprovider::{ModelRequest, ModelResponse, ProviderError, ToolCall};
use tltooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Clone, Default)]
pub struct FanoutAgentHooks {
    hooks: Vec<Arc<dyn AgentHooks>>,
}

impl FanoutAgentHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl AgentHooks for FanoutAgentHooks {
    fn on_model_request(&self, phase: AgentPhase, request: &ModelRequest) {
        for hooks in &self.hooks {
            hooks.on_model_request(phase, request);
        }
    }

    fn on_model_response(&self, phase: AgentPhase, response: &ModelResponse, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_model_response(phase, response, elapsed);
        }
    }

    fn on_model_failure(&self, phase: AgentPhase, error: &ProviderError, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_model_failure(phase, error, elapsed);
        }
    }

    fn on_tool_skipped(&self, tool_call: &ToolCall, error: &ToolError) {
        for hooks in &self.hooks {
            hooks.on_tool_skipped(tool_call, error);
        }
    }

    fn on_turn_complete(&self, outcome: &AgentOutcome, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_turn_complete(outcome, elapsed);
        }
    }
}

#[derive(Clone, Default)]
pub struct FanoutToolHooks {
    hooks: Vec<Arc<dyn ToolRuntimeHooks>>,
}

impl FanoutToolHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl ToolRuntimeHooks for FanoutToolHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        for hooks in &self.hooks {
            hooks.on_execution_start(tool_call, context);
        }
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_execution_success(tool_call, context, result, elapsed);
        }
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_execution_failure(tool_call, context, error, elapsed);
        }
    }
}
