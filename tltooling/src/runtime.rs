//! Tool runtime trait and default registry-backed executor.

use std::sync::Arc;
use std::time::Instant;

use tlprovider::ToolCall;

use crate::{
    NoopToolRuntimeHooks, ToolError, ToolExecutionContext, ToolExecutionResult, ToolFuture,
    ToolRegistry, ToolRuntimeHooks,
};

pub trait ToolRuntime: Send + Sync {
    /// Resolves `tool_call` by name and invokes it. Errors carry the tool name
    /// and call id of the failing call.
    fn execute<'a>(
        &'a self,
        tool_call: &'a ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;
}

#[derive(Clone)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

impl Default for DefaultToolRuntime {
    fn default() -> Self {
        Self::new(Arc::new(ToolRegistry::with_builtin_tools()))
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn execute<'a>(
        &'a self,
        tool_call: &'a ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            self.hooks.on_execution_start(tool_call, &context);
            let started = Instant::now();

            let outcome = match self.registry.handler_for(&tool_call.name) {
                Ok(tool) => tool
                    .invoke(&tool_call.arguments, &context)
                    .await
                    .map(|value| ToolExecutionResult::from_call(tool_call, value)),
                Err(error) => Err(error),
            };

            match outcome {
                Ok(result) => {
                    self.hooks
                        .on_execution_success(tool_call, &context, &result, started.elapsed());
                    Ok(result)
                }
                Err(error) => {
                    let error = error
                        .with_tool_name(tool_call.name.clone())
                        .with_tool_call_id(tool_call.id.clone());
                    self.hooks
                        .on_execution_failure(tool_call, &context, &error, started.elapsed());
                    Err(error)
                }
            }
        })
    }
}
