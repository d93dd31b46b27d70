//! Tool registry keyed by tool definition name.
//!
//! Iteration order is registration order, so the definitions offered to the
//! model are deterministic.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tlcommon::Registry;
use tlprovider::{ToolArguments, ToolDefinition};

use crate::builtin::{ArithmeticTool, ClockTool};
use crate::{FunctionTool, Tool, ToolError, ToolExecutionContext};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `evaluate_arithmetic` followed by `get_current_time`.
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(ArithmeticTool);
        registry.register(ClockTool::local());
        registry
    }

    /// Registers `tool` under its definition name. Re-registering a name
    /// replaces the tool in place.
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        let name = tool.definition().name;
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn register_fn<F, Fut>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(definition, handler));
    }

    pub fn register_sync_fn<F>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Result<Value, ToolError>
            + Send
            + Sync
            + 'static,
    {
        self.register_fn(definition, move |args, context| {
            let output = handler(args, context);
            async move { output }
        });
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn handler_for(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.get(name).ok_or_else(|| {
            ToolError::not_found(format!("tool '{name}' is not registered")).with_tool_name(name)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ToolErrorKind;

    fn definition(name: &str) -> ToolDefinition {
        ToolDefinition::new(name, format!("{name} tool"), json!({"type": "object"}))
    }

    #[test]
    fn definitions_follow_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(definition("zeta"), |_, _| Ok(json!(1)));
        registry.register_sync_fn(definition("alpha"), |_, _| Ok(json!(2)));
        registry.register_sync_fn(definition("mid"), |_, _| Ok(json!(3)));

        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn reregistering_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register_sync_fn(definition("first"), |_, _| Ok(json!(1)));
        registry.register_sync_fn(definition("second"), |_, _| Ok(json!(2)));
        registry.register_sync_fn(
            ToolDefinition::new("first", "replacement", json!({"type": "object"})),
            |_, _| Ok(json!(3)),
        );

        let definitions = registry.definitions();
        assert_eq!(registry.len(), 2);
        assert_eq!(definitions[0].name, "first");
        assert_eq!(definitions[0].description, "replacement");
    }

    #[test]
    fn handler_for_unknown_name_is_not_found() {
        let registry = ToolRegistry::with_builtin_tools();
        let error = match registry.handler_for("send_email") {
            Ok(_) => panic!("unknown tool must not resolve"),
            Err(error) => error,
        };

        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert_eq!(error.tool_name.as_deref(), Some("send_email"));
        assert!(registry.handler_for("evaluate_arithmetic").is_ok());
    }

    #[test]
    fn builtin_registry_lists_arithmetic_then_clock() {
        let registry = ToolRegistry::with_builtin_tools();
        assert_eq!(registry.names(), vec!["evaluate_arithmetic", "get_current_time"]);
        assert!(registry.contains("get_current_time"));
        assert!(!registry.is_empty());
    }
}
