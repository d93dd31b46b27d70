use std::future::Future;
use std::pin::Pin;

use crate::{ModelRequest, ModelResponse, ProviderError};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Chat completion backend.
///
/// A request with an empty `tools` list must not yield tool calls. Errors are
/// returned as-is; implementations do not retry.
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;
}
