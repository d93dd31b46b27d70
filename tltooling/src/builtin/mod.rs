//! Built-in tools: arithmetic evaluation and current-time lookup.

mod arithmetic;
mod clock;
pub mod expression;

pub use arithmetic::{ARITHMETIC_TOOL_NAME, ArithmeticTool};
pub use clock::{CLOCK_TOOL_NAME, ClockTool, TimeFormat};
