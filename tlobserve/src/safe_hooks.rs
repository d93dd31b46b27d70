//! Wrappers that keep a panicking hook from unwinding through the agent.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use tlagent::{AgentHooks, AgentOutcome, AgentPhase};
use tlprovider::{ModelRequest, ModelResponse, ProviderError, ToolCall};
use tltooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

pub struct SafeAgentHooks<H> {
    inner: H,
}

impl<H> SafeAgentHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> AgentHooks for SafeAgentHooks<H>
where
    H: AgentHooks,
{
    fn on_model_request(&self, phase: AgentPhase, request: &ModelRequest) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_request(phase, request)
        }));
    }

    fn on_model_response(&self, phase: AgentPhase, response: &ModelResponse, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_response(phase, response, elapsed)
        }));
    }

    fn on_model_failure(&self, phase: AgentPhase, error: &ProviderError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_model_failure(phase, error, elapsed)
        }));
    }

    fn on_tool_skipped(&self, tool_call: &ToolCall, error: &ToolError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_tool_skipped(tool_call, error)
        }));
    }

    fn on_turn_complete(&self, outcome: &AgentOutcome, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_complete(outcome, elapsed)
        }));
    }
}

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(tool_call, context)
        }));
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        }));
    }
}
