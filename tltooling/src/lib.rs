//! Tool registration and execution for the toolloop agent.
//!
//! ```rust
//! use tltooling::ToolRegistry;
//!
//! let registry = ToolRegistry::with_builtin_tools();
//! let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
//! assert_eq!(names, ["evaluate_arithmetic", "get_current_time"]);
//! ```

mod args;
pub mod builtin;
mod error;
mod hooks;
mod registry;
mod runtime;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, FunctionTool, NoopToolRuntimeHooks, Tool, ToolError, ToolErrorKind,
        ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime,
        ToolRuntimeHooks,
    };
}

pub use args::{optional_string, string_or_default};
pub use builtin::{ArithmeticTool, ClockTool, TimeFormat};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
