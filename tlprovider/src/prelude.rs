//! Common `tlprovider` imports for downstream crates.

pub use crate::{
    Message, ModelProvider, ModelRequest, ModelRequestBuilder, ModelResponse, ProviderError,
    ProviderErrorKind, ProviderFuture, Role, StopReason, TokenUsage, ToolArguments, ToolCall,
    ToolDefinition,
};
pub use tlcommon::{BoxFuture, GenerationOptions};
