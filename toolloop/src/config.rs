//! Agent configuration with environment overrides.
//!
//! | Variable | Field |
//! |---|---|
//! | `TOOLLOOP_MODEL` | `model` |
//! | `TOOLLOOP_OLLAMA_URL`, then `OLLAMA_HOST` | `base_url` |
//! | `TOOLLOOP_TEMPERATURE` | `temperature` |
//! | `TOOLLOOP_MAX_TOKENS` | `max_tokens` |
//! | `TOOLLOOP_TIMEOUT_SECS` | `request_timeout` |
//! | `TOOLLOOP_SYSTEM_PROMPT` | `system_prompt` |
//! | `TOOLLOOP_ON_TOOL_FAILURE` (`content` or `error`) | `tool_failure_policy` |
//!
//! ```rust
//! use toolloop::AgentConfig;
//!
//! let config = AgentConfig::from_lookup(|key| match key {
//!     "TOOLLOOP_MODEL" => Some("qwen2.5:7b".to_string()),
//!     "OLLAMA_HOST" => Some("gpu-box:11434".to_string()),
//!     _ => None,
//! })
//! .expect("config should load");
//!
//! assert_eq!(config.model, "qwen2.5:7b");
//! assert_eq!(config.base_url, "http://gpu-box:11434");
//! assert_eq!(config.temperature, 0.7);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use tlagent::{AgentSettings, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ToolFailurePolicy};
use tlcommon::GenerationOptions;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

pub const ENV_MODEL: &str = "TOOLLOOP_MODEL";
pub const ENV_OLLAMA_URL: &str = "TOOLLOOP_OLLAMA_URL";
pub const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";
pub const ENV_TEMPERATURE: &str = "TOOLLOOP_TEMPERATURE";
pub const ENV_MAX_TOKENS: &str = "TOOLLOOP_MAX_TOKENS";
pub const ENV_TIMEOUT_SECS: &str = "TOOLLOOP_TIMEOUT_SECS";
pub const ENV_SYSTEM_PROMPT: &str = "TOOLLOOP_SYSTEM_PROMPT";
pub const ENV_ON_TOOL_FAILURE: &str = "TOOLLOOP_ON_TOOL_FAILURE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    InvalidValue,
    Client,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    /// Setting or environment variable at fault, when there is one.
    pub key: Option<String>,
    pub message: String,
}

impl ConfigError {
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::InvalidValue,
            key: Some(key.into()),
            message: message.into(),
        }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::Client,
            key: None,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: ConfigErrorKind::Unsupported,
            key: None,
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{:?} [{}]: {}", self.kind, key, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// HTTP client timeout. None leaves backend calls unbounded.
    pub request_timeout: Option<Duration>,
    pub system_prompt: Option<String>,
    pub tool_failure_policy: ToolFailurePolicy,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            request_timeout: None,
            system_prompt: None,
            tool_failure_policy: ToolFailurePolicy::default(),
        }
    }
}

impl AgentConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_tool_failure_policy(mut self, policy: ToolFailurePolicy) -> Self {
        self.tool_failure_policy = policy;
        self
    }

    /// Defaults overlaid with the process environment, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AgentConfig::from_env`] but reads variables through `lookup`.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(model) = read(ENV_MODEL) {
            config.model = model;
        }

        if let Some(url) = read(ENV_OLLAMA_URL).or_else(|| read(ENV_OLLAMA_HOST)) {
            config.base_url = normalize_base_url(&url);
        }

        if let Some(value) = read(ENV_TEMPERATURE) {
            config.temperature = parse_value(ENV_TEMPERATURE, &value)?;
        }

        if let Some(value) = read(ENV_MAX_TOKENS) {
            config.max_tokens = Some(parse_value(ENV_MAX_TOKENS, &value)?);
        }

        if let Some(value) = read(ENV_TIMEOUT_SECS) {
            let seconds: u64 = parse_value(ENV_TIMEOUT_SECS, &value)?;
            config.request_timeout = Some(Duration::from_secs(seconds));
        }

        if let Some(prompt) = read(ENV_SYSTEM_PROMPT) {
            config.system_prompt = Some(prompt);
        }

        if let Some(value) = read(ENV_ON_TOOL_FAILURE) {
            config.tool_failure_policy = parse_policy(&value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid_value("model", "model must not be empty"));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::invalid_value(
                "base_url",
                format!("'{}' must start with http:// or https://", self.base_url),
            ));
        }

        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid_value(
                "temperature",
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        if self.max_tokens == Some(0) {
            return Err(ConfigError::invalid_value(
                "max_tokens",
                "max_tokens must be greater than zero",
            ));
        }

        if self.request_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ConfigError::invalid_value(
                "request_timeout",
                "request timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    pub fn settings(&self) -> AgentSettings {
        let mut options = GenerationOptions::default().with_temperature(self.temperature);
        options.max_tokens = self.max_tokens;

        AgentSettings {
            model: self.model.clone(),
            options,
            system_prompt: self.system_prompt.clone(),
            tool_failure_policy: self.tool_failure_policy,
        }
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|err| ConfigError::invalid_value(key, format!("'{value}': {err}")))
}

fn parse_policy(value: &str) -> Result<ToolFailurePolicy, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "content" | "return-content" | "fallback" => Ok(ToolFailurePolicy::ReturnModelContent),
        "error" | "fail" => Ok(ToolFailurePolicy::Error),
        other => Err(ConfigError::invalid_value(
            ENV_ON_TOOL_FAILURE,
            format!("'{other}' is not one of: content, error"),
        )),
    }
}

/// `OLLAMA_HOST` is commonly written without a scheme (`127.0.0.1:11434`).
fn normalize_base_url(value: &str) -> String {
    if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{value}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AgentConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AgentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = load(&[]).expect("defaults are valid");
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn every_variable_is_applied() {
        let config = load(&[
            ("TOOLLOOP_MODEL", "mistral-nemo"),
            ("TOOLLOOP_OLLAMA_URL", "https://ollama.internal"),
            ("OLLAMA_HOST", "ignored:1234"),
            ("TOOLLOOP_TEMPERATURE", "0.2"),
            ("TOOLLOOP_MAX_TOKENS", "256"),
            ("TOOLLOOP_TIMEOUT_SECS", "30"),
            ("TOOLLOOP_SYSTEM_PROMPT", "Call tools only when necessary."),
            ("TOOLLOOP_ON_TOOL_FAILURE", "error"),
        ])
        .expect("config should load");

        assert_eq!(config.model, "mistral-nemo");
        assert_eq!(config.base_url, "https://ollama.internal");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(
            config.system_prompt.as_deref(),
            Some("Call tools only when necessary.")
        );
        assert_eq!(config.tool_failure_policy, ToolFailurePolicy::Error);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = load(&[("TOOLLOOP_MODEL", "   "), ("TOOLLOOP_TEMPERATURE", "")])
            .expect("blank values count as unset");
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let error = load(&[("TOOLLOOP_TEMPERATURE", "warm")]).expect_err("must fail");
        assert_eq!(error.kind, ConfigErrorKind::InvalidValue);
        assert_eq!(error.key.as_deref(), Some("TOOLLOOP_TEMPERATURE"));

        let error = load(&[("TOOLLOOP_MAX_TOKENS", "-1")]).expect_err("must fail");
        assert_eq!(error.key.as_deref(), Some("TOOLLOOP_MAX_TOKENS"));

        let error = load(&[("TOOLLOOP_ON_TOOL_FAILURE", "retry")]).expect_err("must fail");
        assert!(error.message.contains("content, error"));
    }

    #[test]
    fn validation_rejects_out_of_range_settings() {
        let error = load(&[("TOOLLOOP_TEMPERATURE", "2.5")]).expect_err("must fail");
        assert_eq!(error.key.as_deref(), Some("temperature"));

        assert!(AgentConfig::default().with_max_tokens(0).validate().is_err());
        assert!(AgentConfig::new(" ").validate().is_err());
        assert!(
            AgentConfig::default()
                .with_base_url("ftp://localhost")
                .validate()
                .is_err()
        );
        assert!(
            AgentConfig::default()
                .with_request_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn settings_carry_generation_options_and_policy() {
        let settings = AgentConfig::new("llama3.2")
            .with_temperature(0.1)
            .with_max_tokens(32)
            .with_tool_failure_policy(ToolFailurePolicy::Error)
            .settings();

        assert_eq!(settings.model, "llama3.2");
        assert_eq!(settings.options.temperature, Some(0.1));
        assert_eq!(settings.options.max_tokens, Some(32));
        assert_eq!(settings.tool_failure_policy, ToolFailurePolicy::Error);
    }
}
