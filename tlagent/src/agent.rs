//! Single-round tool-calling loop.
//!
//! One turn makes at most two backend calls: the initial call offers every
//! registered tool; if the model requests tools, the first call that executes
//! successfully is answered in a follow-up call that offers no tools.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tlprovider::{Message, ModelProvider, ModelRequest, ModelResponse, ToolDefinition};
use tltooling::{
    DefaultToolRuntime, ToolExecutionContext, ToolExecutionResult, ToolRegistry, ToolRuntime,
};

use crate::{
    AgentError, AgentHooks, AgentOutcome, AgentPhase, AgentSettings, AgentTurnRequest,
    AnswerPath, NoopAgentHooks, SkippedToolCall, ToolFailurePolicy,
};

#[derive(Clone)]
pub struct ToolAgent {
    provider: Arc<dyn ModelProvider>,
    registry: Arc<ToolRegistry>,
    runtime: Arc<dyn ToolRuntime>,
    hooks: Arc<dyn AgentHooks>,
    settings: AgentSettings,
}

impl ToolAgent {
    pub fn new(provider: Arc<dyn ModelProvider>, registry: Arc<ToolRegistry>) -> Self {
        Self::builder(provider).registry(registry).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ToolAgentBuilder {
        ToolAgentBuilder::new(provider)
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    /// Answers a single query with no prior conversation.
    pub async fn process_query(&self, query: &str) -> Result<String, AgentError> {
        self.run(AgentTurnRequest::new(query))
            .await
            .map(|outcome| outcome.answer)
    }

    pub async fn process_with_history(
        &self,
        history: &[Message],
        query: &str,
    ) -> Result<String, AgentError> {
        self.run(AgentTurnRequest::new(query).with_history(history.to_vec()))
            .await
            .map(|outcome| outcome.answer)
    }

    pub async fn run(&self, request: AgentTurnRequest) -> Result<AgentOutcome, AgentError> {
        if request.query.trim().is_empty() {
            return Err(AgentError::invalid_request("query must not be empty"));
        }

        let started = Instant::now();
        let conversation = self.conversation(request);
        let initial = self
            .complete(
                AgentPhase::InitialRequest,
                conversation.clone(),
                self.registry.definitions(),
            )
            .await?;

        if initial.tool_calls().is_empty() {
            let outcome = AgentOutcome {
                answer: initial.message.content,
                path: AnswerPath::Direct,
                executed_tool: None,
                skipped_calls: Vec::new(),
                usage: initial.usage,
                model_calls: 1,
            };
            return Ok(self.finish(outcome, started.elapsed()));
        }

        let mut skipped_calls = Vec::new();
        for tool_call in initial.tool_calls() {
            let context = ToolExecutionContext::for_call(tool_call);
            match self.runtime.execute(tool_call, context).await {
                Ok(result) => {
                    let outcome = self
                        .follow_up(conversation, &initial, result, skipped_calls)
                        .await?;
                    return Ok(self.finish(outcome, started.elapsed()));
                }
                Err(error) => {
                    tracing::warn!(
                        tool_name = %tool_call.name,
                        tool_call_id = %tool_call.id,
                        model_error = error.is_model_error(),
                        error = %error,
                        "skipping failed tool call"
                    );
                    self.hooks.on_tool_skipped(tool_call, &error);
                    skipped_calls.push(SkippedToolCall {
                        call: tool_call.clone(),
                        error,
                    });
                }
            }
        }

        match self.settings.tool_failure_policy {
            ToolFailurePolicy::ReturnModelContent => {
                let outcome = AgentOutcome {
                    answer: initial.message.content,
                    path: AnswerPath::ToolFailureFallback,
                    executed_tool: None,
                    skipped_calls,
                    usage: initial.usage,
                    model_calls: 1,
                };
                Ok(self.finish(outcome, started.elapsed()))
            }
            ToolFailurePolicy::Error => Err(AgentError::no_usable_tool(
                skipped_calls.into_iter().map(|skipped| skipped.error).collect(),
            )),
        }
    }

    fn conversation(&self, request: AgentTurnRequest) -> Vec<Message> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if let Some(system_prompt) = &self.settings.system_prompt {
            messages.push(Message::system(system_prompt.clone()));
        }

        messages.extend(request.history);
        messages.push(Message::user(request.query));
        messages
    }

    async fn follow_up(
        &self,
        mut conversation: Vec<Message>,
        initial: &ModelResponse,
        result: ToolExecutionResult,
        skipped_calls: Vec<SkippedToolCall>,
    ) -> Result<AgentOutcome, AgentError> {
        conversation.push(initial.message.clone());
        conversation.push(result.clone().into_message());

        let response = self
            .complete(AgentPhase::FollowUp, conversation, Vec::new())
            .await?;

        Ok(AgentOutcome {
            answer: response.message.content,
            path: AnswerPath::ToolResult,
            executed_tool: Some(result),
            skipped_calls,
            usage: initial.usage.saturating_add(response.usage),
            model_calls: 2,
        })
    }

    async fn complete(
        &self,
        phase: AgentPhase,
        messages: Vec<Message>,
        tools: Vec<ToolDefinition>,
    ) -> Result<ModelResponse, AgentError> {
        let request = ModelRequest::builder(self.settings.model.clone())
            .messages(messages)
            .options(self.settings.options)
            .tools(tools)
            .build()
            .map_err(|error| AgentError::provider(phase, error))?;

        if let Some(prompt) = request.messages.last() {
            tracing::debug!(
                phase = %phase,
                model = %request.model,
                tools = request.tools.len(),
                prompt = %prompt.content,
                "sending model request"
            );
        }
        self.hooks.on_model_request(phase, &request);

        let started = Instant::now();
        match self.provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(
                    phase = %phase,
                    content = %response.message.content,
                    tool_calls = response.tool_calls().len(),
                    "received model response"
                );
                self.hooks
                    .on_model_response(phase, &response, started.elapsed());
                Ok(response)
            }
            Err(error) => {
                self.hooks.on_model_failure(phase, &error, started.elapsed());
                Err(AgentError::provider(phase, error))
            }
        }
    }

    fn finish(&self, outcome: AgentOutcome, elapsed: Duration) -> AgentOutcome {
        self.hooks.on_turn_complete(&outcome, elapsed);
        outcome
    }
}

impl std::fmt::Debug for ToolAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolAgent")
            .field("provider", &self.provider.name())
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish()
    }
}

pub struct ToolAgentBuilder {
    provider: Arc<dyn ModelProvider>,
    registry: Option<Arc<ToolRegistry>>,
    runtime: Option<Arc<dyn ToolRuntime>>,
    hooks: Arc<dyn AgentHooks>,
    settings: AgentSettings,
}

impl ToolAgentBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            registry: None,
            runtime: None,
            hooks: Arc::new(NoopAgentHooks),
            settings: AgentSettings::default(),
        }
    }

    /// Tools offered to the model. Defaults to the built-in tools.
    pub fn registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Overrides how tool calls are executed. The runtime should resolve the
    /// same names the registry offers.
    pub fn runtime(mut self, runtime: Arc<dyn ToolRuntime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn AgentHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.settings.options.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.settings.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.settings.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn tool_failure_policy(mut self, policy: ToolFailurePolicy) -> Self {
        self.settings.tool_failure_policy = policy;
        self
    }

    pub fn build(self) -> ToolAgent {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::with_builtin_tools()));
        let runtime = self.runtime.unwrap_or_else(|| {
            Arc::new(DefaultToolRuntime::new(Arc::clone(&registry))) as Arc<dyn ToolRuntime>
        });

        ToolAgent {
            provider: self.provider,
            registry,
            runtime,
            hooks: self.hooks,
            settings: self.settings,
        }
    }
}
