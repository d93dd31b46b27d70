//! Tracing-based observability hooks for agent turns and tool execution.
//!
//! ```rust
//! use tlagent::AgentHooks;
//! use tlobserve::TracingObservabilityHooks;
//!
//! fn accepts_agent_hooks(_hooks: &dyn AgentHooks) {}
//!
//! accepts_agent_hooks(&TracingObservabilityHooks);
//! ```

use std::time::Duration;

use tlagent::{AgentHooks, AgentOutcome, AgentPhase};
use tlprovider::{ModelRequest, ModelResponse, ProviderError, ToolCall};
use tltooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl AgentHooks for TracingObservabilityHooks {
    fn on_model_request(&self, phase: AgentPhase, request: &ModelRequest) {
        tracing::info!(
            phase = "model",
            event = "request",
            agent_phase = %phase,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len()
        );
    }

    fn on_model_response(&self, phase: AgentPhase, response: &ModelResponse, elapsed: Duration) {
        tracing::info!(
            phase = "model",
            event = "response",
            agent_phase = %phase,
            model = %response.model,
            stop_reason = ?response.stop_reason,
            tool_calls = response.tool_calls().len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_model_failure(&self, phase: AgentPhase, error: &ProviderError, elapsed: Duration) {
        tracing::error!(
            phase = "model",
            event = "failure",
            agent_phase = %phase,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_tool_skipped(&self, tool_call: &ToolCall, error: &ToolError) {
        tracing::warn!(
            phase = "agent",
            event = "tool_skipped",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            error_kind = ?error.kind,
            model_error = error.is_model_error(),
            error = %error
        );
    }

    fn on_turn_complete(&self, outcome: &AgentOutcome, elapsed: Duration) {
        tracing::info!(
            phase = "agent",
            event = "turn_complete",
            path = ?outcome.path,
            executed_tool = outcome.executed_tool.as_ref().map(|result| result.tool_name.as_str()),
            skipped_calls = outcome.skipped_calls.len(),
            model_calls = outcome.model_calls,
            total_tokens = outcome.usage.total_tokens,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = context.tool_call_id.as_deref()
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = context.tool_call_id.as_deref(),
            output = %result.output_text(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = context.tool_call_id.as_deref(),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
