use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tlagent::{AgentHooks, AgentOutcome, AgentPhase, AnswerPath};
use tlprovider::{
    Message, ModelRequest, ModelResponse, ProviderError, TokenUsage, ToolArguments, ToolCall,
};
use tltooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

use crate::{
    FanoutAgentHooks, FanoutToolHooks, MetricsObservabilityHooks, SafeAgentHooks, SafeToolHooks,
    TracingObservabilityHooks,
};

fn sample_tool_call() -> ToolCall {
    let mut arguments = ToolArguments::new();
    arguments.insert("expression".to_string(), json!("2^3"));
    ToolCall::new("call_0", "evaluate_arithmetic", arguments)
}

fn sample_tool_context() -> ToolExecutionContext {
    ToolExecutionContext::for_call(&sample_tool_call())
}

fn sample_request() -> ModelRequest {
    ModelRequest::new("llama3.1:8b", vec![Message::user("What is 2^3?")])
}

fn sample_response() -> ModelResponse {
    ModelResponse::new("llama3.1:8b", Message::assistant("8")).with_usage(TokenUsage::new(12, 3))
}

fn sample_outcome() -> AgentOutcome {
    AgentOutcome {
        answer: "8".to_string(),
        path: AnswerPath::ToolResult,
        executed_tool: Some(ToolExecutionResult::from_call(&sample_tool_call(), json!(8))),
        skipped_calls: Vec::new(),
        usage: TokenUsage::new(30, 6),
        model_calls: 2,
    }
}

fn exercise_agent_hooks(hooks: &dyn AgentHooks) {
    let provider_error = ProviderError::timeout("provider timeout");
    let tool_error = ToolError::not_found("tool 'send_email' is not registered");

    hooks.on_model_request(AgentPhase::InitialRequest, &sample_request());
    hooks.on_model_response(
        AgentPhase::InitialRequest,
        &sample_response(),
        Duration::from_millis(15),
    );
    hooks.on_model_failure(AgentPhase::FollowUp, &provider_error, Duration::from_millis(5));
    hooks.on_tool_skipped(&sample_tool_call(), &tool_error);
    hooks.on_turn_complete(&sample_outcome(), Duration::from_millis(40));
}

fn exercise_tool_hooks(hooks: &dyn ToolRuntimeHooks) {
    let tool_error = ToolError::evaluation("division by zero");

    hooks.on_execution_start(&sample_tool_call(), &sample_tool_context());
    hooks.on_execution_success(
        &sample_tool_call(),
        &sample_tool_context(),
        &ToolExecutionResult::from_call(&sample_tool_call(), json!(8)),
        Duration::from_millis(1),
    );
    hooks.on_execution_failure(
        &sample_tool_call(),
        &sample_tool_context(),
        &tool_error,
        Duration::from_millis(1),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_agent_hooks(&TracingObservabilityHooks);
    exercise_tool_hooks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_agent_hooks(&MetricsObservabilityHooks);
    exercise_tool_hooks(&MetricsObservabilityHooks);
}

#[derive(Default)]
struct CountingHooks {
    events: Mutex<Vec<&'static str>>,
}

impl CountingHooks {
    fn record(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("events lock").clone()
    }
}

impl AgentHooks for CountingHooks {
    fn on_model_request(&self, _phase: AgentPhase, _request: &ModelRequest) {
        self.record("model_request");
    }

    fn on_model_response(&self, _phase: AgentPhase, _response: &ModelResponse, _elapsed: Duration) {
        self.record("model_response");
    }

    fn on_model_failure(&self, _phase: AgentPhase, _error: &ProviderError, _elapsed: Duration) {
        self.record("model_failure");
    }

    fn on_tool_skipped(&self, _tool_call: &ToolCall, _error: &ToolError) {
        self.record("tool_skipped");
    }

    fn on_turn_complete(&self, _outcome: &AgentOutcome, _elapsed: Duration) {
        self.record("turn_complete");
    }
}

impl ToolRuntimeHooks for CountingHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        self.record("execution_start");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        self.record("execution_success");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        self.record("execution_failure");
    }
}

struct PanickingHooks;

impl AgentHooks for PanickingHooks {
    fn on_model_request(&self, _phase: AgentPhase, _request: &ModelRequest) {
        panic!("model_request panic");
    }

    fn on_model_response(&self, _phase: AgentPhase, _response: &ModelResponse, _elapsed: Duration) {
        panic!("model_response panic");
    }

    fn on_model_failure(&self, _phase: AgentPhase, _error: &ProviderError, _elapsed: Duration) {
        panic!("model_failure panic");
    }

    fn on_tool_skipped(&self, _tool_call: &ToolCall, _error: &ToolError) {
        panic!("tool_skipped panic");
    }

    fn on_turn_complete(&self, _outcome: &AgentOutcome, _elapsed: Duration) {
        panic!("turn_complete panic");
    }
}

impl ToolRuntimeHooks for PanickingHooks {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {
        panic!("start panic");
    }

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        panic!("failure panic");
    }
}

struct Shared(Arc<CountingHooks>);

impl AgentHooks for Shared {
    fn on_model_request(&self, phase: AgentPhase, request: &ModelRequest) {
        AgentHooks::on_model_request(self.0.as_ref(), phase, request);
    }

    fn on_turn_complete(&self, outcome: &AgentOutcome, elapsed: Duration) {
        AgentHooks::on_turn_complete(self.0.as_ref(), outcome, elapsed);
    }
}

#[test]
fn safe_agent_hooks_delegate_when_inner_succeeds() {
    let inner = Arc::new(CountingHooks::default());
    let hooks = SafeAgentHooks::new(Shared(inner.clone()));

    exercise_agent_hooks(&hooks);

    assert_eq!(inner.events(), vec!["model_request", "turn_complete"]);
}

#[test]
fn safe_agent_hooks_swallow_panics() {
    exercise_agent_hooks(&SafeAgentHooks::new(PanickingHooks));
}

#[test]
fn safe_tool_hooks_delegate_and_swallow_panics() {
    let counting = SafeToolHooks::new(CountingHooks::default());
    exercise_tool_hooks(&counting);

    exercise_tool_hooks(&SafeToolHooks::new(PanickingHooks));
}

#[test]
fn fanout_delivers_every_callback_to_every_hook() {
    let first = Arc::new(CountingHooks::default());
    let second = Arc::new(CountingHooks::default());

    let agent_hooks = FanoutAgentHooks::new()
        .with(first.clone())
        .with(second.clone());
    exercise_agent_hooks(&agent_hooks);

    let tool_hooks = FanoutToolHooks::new().with(first.clone());
    exercise_tool_hooks(&tool_hooks);

    let agent_events = vec![
        "model_request",
        "model_response",
        "model_failure",
        "tool_skipped",
        "turn_complete",
    ];
    assert_eq!(second.events(), agent_events);

    let mut expected_first = agent_events;
    expected_first.extend(["execution_start", "execution_success", "execution_failure"]);
    assert_eq!(first.events(), expected_first);
    assert!(!agent_hooks.is_empty());
}
