//! Observability hooks for agent turns and tool execution.
//!
//! ```rust
//! use tlobserve::{MetricsObservabilityHooks, SafeAgentHooks, TracingObservabilityHooks};
//!
//! let _agent_hooks = SafeAgentHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod fanout;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use fanout::{FanoutAgentHooks, FanoutToolHooks};
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeAgentHooks, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        FanoutAgentHooks, FanoutToolHooks, MetricsObservabilityHooks, SafeAgentHooks,
        SafeToolHooks, TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
