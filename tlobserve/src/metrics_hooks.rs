//! Metrics-based observability hooks for agent turns and tool execution.
//!
//! ```rust
//! use tlobserve::MetricsObservabilityHooks;
//! use tltooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! accepts_tool_hooks(&MetricsObservabilityHooks);
//! ```

use std::time::Duration;

use tlagent::{AgentHooks, AgentOutcome, AgentPhase};
use tlprovider::{ModelRequest, ModelResponse, ProviderError, ToolCall};
use tltooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl AgentHooks for MetricsObservabilityHooks {
    fn on_model_request(&self, phase: AgentPhase, request: &ModelRequest) {
        metrics::counter!(
            "toolloop_model_request_total",
            "phase" => phase.as_str(),
            "model" => request.model.clone()
        )
        .increment(1);
    }

    fn on_model_response(&self, phase: AgentPhase, response: &ModelResponse, elapsed: Duration) {
        metrics::counter!(
            "toolloop_model_response_total",
            "phase" => phase.as_str(),
            "model" => response.model.clone()
        )
        .increment(1);
        metrics::histogram!(
            "toolloop_model_duration_seconds",
            "phase" => phase.as_str(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
        metrics::counter!("toolloop_model_tokens_total", "direction" => "input")
            .increment(u64::from(response.usage.input_tokens));
        metrics::counter!("toolloop_model_tokens_total", "direction" => "output")
            .increment(u64::from(response.usage.output_tokens));
    }

    fn on_model_failure(&self, phase: AgentPhase, error: &ProviderError, elapsed: Duration) {
        metrics::counter!(
            "toolloop_model_failure_total",
            "phase" => phase.as_str(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "toolloop_model_duration_seconds",
            "phase" => phase.as_str(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_tool_skipped(&self, tool_call: &ToolCall, error: &ToolError) {
        metrics::counter!(
            "toolloop_tool_skipped_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_turn_complete(&self, outcome: &AgentOutcome, elapsed: Duration) {
        metrics::counter!(
            "toolloop_turn_complete_total",
            "path" => format!("{:?}", outcome.path)
        )
        .increment(1);
        metrics::histogram!("toolloop_turn_duration_seconds").record(elapsed.as_secs_f64());
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "toolloop_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "toolloop_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "toolloop_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "toolloop_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "toolloop_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
