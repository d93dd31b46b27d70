//! Runtime wiring from an [`AgentConfig`] to a ready [`ToolAgent`].

use std::sync::Arc;

use tlagent::{AgentHooks, ToolAgent};
use tlobserve::{
    FanoutAgentHooks, FanoutToolHooks, MetricsObservabilityHooks, SafeAgentHooks, SafeToolHooks,
    TracingObservabilityHooks,
};
use tlprovider::ModelProvider;
use tltooling::{DefaultToolRuntime, ToolRegistry, ToolRuntimeHooks};

use crate::{AgentConfig, ConfigError};

/// Tracing and metrics hooks for agent turns, isolated from panics.
pub fn default_agent_hooks() -> Arc<dyn AgentHooks> {
    let fanout = FanoutAgentHooks::new()
        .with(Arc::new(TracingObservabilityHooks))
        .with(Arc::new(MetricsObservabilityHooks));
    Arc::new(SafeAgentHooks::new(fanout))
}

/// Tracing and metrics hooks for tool execution, isolated from panics.
pub fn default_tool_hooks() -> Arc<dyn ToolRuntimeHooks> {
    let fanout = FanoutToolHooks::new()
        .with(Arc::new(TracingObservabilityHooks))
        .with(Arc::new(MetricsObservabilityHooks));
    Arc::new(SafeToolHooks::new(fanout))
}

/// Builds an agent over `provider` with the built-in tools and the default
/// observability hooks.
pub fn build_agent_with_provider(
    provider: Arc<dyn ModelProvider>,
    config: &AgentConfig,
) -> Result<ToolAgent, ConfigError> {
    build_agent_with_registry(provider, Arc::new(ToolRegistry::with_builtin_tools()), config)
}

pub fn build_agent_with_registry(
    provider: Arc<dyn ModelProvider>,
    registry: Arc<ToolRegistry>,
    config: &AgentConfig,
) -> Result<ToolAgent, ConfigError> {
    config.validate()?;

    let runtime = DefaultToolRuntime::new(Arc::clone(&registry)).with_hooks(default_tool_hooks());
    Ok(ToolAgent::builder(provider)
        .registry(registry)
        .runtime(Arc::new(runtime))
        .hooks(default_agent_hooks())
        .settings(config.settings())
        .build())
}

#[cfg(feature = "provider-ollama")]
pub fn build_ollama_provider(config: &AgentConfig) -> Result<Arc<dyn ModelProvider>, ConfigError> {
    use tlprovider::adapters::ollama::{OllamaHttpTransport, OllamaProvider};

    config.validate()?;

    let mut client = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout {
        client = client.timeout(timeout);
    }
    let client = client
        .build()
        .map_err(|err| ConfigError::client(err.to_string()))?;

    let transport = OllamaHttpTransport::new(client).with_base_url(config.base_url.clone());
    Ok(Arc::new(OllamaProvider::new(Arc::new(transport))))
}

#[cfg(not(feature = "provider-ollama"))]
pub fn build_ollama_provider(config: &AgentConfig) -> Result<Arc<dyn ModelProvider>, ConfigError> {
    config.validate()?;
    Err(ConfigError::unsupported(
        "provider-ollama feature is not enabled on toolloop",
    ))
}

/// Agent talking to the Ollama endpoint named by `config`.
pub fn build_ollama_agent(config: &AgentConfig) -> Result<ToolAgent, ConfigError> {
    let provider = build_ollama_provider(config)?;
    build_agent_with_provider(provider, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigErrorKind;

    #[cfg(feature = "provider-ollama")]
    #[test]
    fn ollama_agent_builds_without_contacting_the_backend() {
        let config = AgentConfig::new("llama3.1:8b")
            .with_base_url("http://127.0.0.1:9")
            .with_request_timeout(std::time::Duration::from_secs(5));
        let agent = build_ollama_agent(&config).expect("agent should build");

        assert_eq!(agent.settings().model, "llama3.1:8b");
        assert_eq!(agent.settings().options.temperature, Some(0.7));
        assert_eq!(
            agent.registry().names(),
            vec!["evaluate_arithmetic", "get_current_time"]
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let config = AgentConfig::default().with_temperature(-1.0);
        let error = match build_ollama_agent(&config) {
            Ok(_) => panic!("invalid config must not build"),
            Err(error) => error,
        };
        assert_eq!(error.kind, ConfigErrorKind::InvalidValue);
    }
}
