//! Agent-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tlprovider::ProviderError;
use tltooling::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    InvalidRequest,
    Provider,
    /// Every tool call the model requested failed and the agent is configured
    /// to surface that instead of answering.
    NoUsableTool,
}

/// Which backend call of a turn an event or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    InitialRequest,
    ToolExecution,
    FollowUp,
}

impl AgentPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialRequest => "initial_request",
            Self::ToolExecution => "tool_execution",
            Self::FollowUp => "follow_up",
        }
    }
}

impl Display for AgentPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentError {
    pub kind: AgentErrorKind,
    pub message: String,
    pub phase: Option<AgentPhase>,
    pub provider_error: Option<ProviderError>,
    pub tool_errors: Vec<ToolError>,
}

impl AgentError {
    pub fn new(kind: AgentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            phase: None,
            provider_error: None,
            tool_errors: Vec::new(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::InvalidRequest, message)
    }

    pub fn provider(phase: AgentPhase, error: ProviderError) -> Self {
        Self {
            kind: AgentErrorKind::Provider,
            message: error.to_string(),
            phase: Some(phase),
            provider_error: Some(error),
            tool_errors: Vec::new(),
        }
    }

    pub fn no_usable_tool(tool_errors: Vec<ToolError>) -> Self {
        let message = format!(
            "all {} requested tool call(s) failed",
            tool_errors.len()
        );
        Self {
            kind: AgentErrorKind::NoUsableTool,
            message,
            phase: Some(AgentPhase::ToolExecution),
            provider_error: None,
            tool_errors,
        }
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "{:?} [phase={}]: {}", self.kind, phase, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.provider_error
            .as_ref()
            .map(|error| error as &(dyn Error + 'static))
    }
}
