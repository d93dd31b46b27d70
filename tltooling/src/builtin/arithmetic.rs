use serde_json::{Value, json};
use tlprovider::{ToolArguments, ToolDefinition};

use super::expression;
use crate::{Tool, ToolError, ToolExecutionContext, ToolFuture, string_or_default};

pub const ARITHMETIC_TOOL_NAME: &str = "evaluate_arithmetic";

/// Evaluates numeric expressions such as `1 + 3/(25+7)^2`. `^` is read as
/// exponentiation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticTool;

impl ArithmeticTool {
    pub fn evaluate(expression: &str) -> Result<Value, ToolError> {
        let rewritten = expression.replace('^', "**");
        expression::evaluate(&rewritten)
            .map(|number| number.to_json())
            .map_err(|err| ToolError::evaluation(format!("Error evaluating expression: {err}")))
    }
}

impl Tool for ArithmeticTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            ARITHMETIC_TOOL_NAME,
            "Evaluate a simple arithmetic expression provided as input. The expression should be \
             numeric only and may contain +, -, *, /, parentheses, and '^' for exponentiation.",
            json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "The arithmetic expression to evaluate"
                    }
                },
                "required": ["expression"]
            }),
        )
    }

    fn invoke<'a>(
        &'a self,
        args: &'a ToolArguments,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>> {
        Box::pin(async move { Self::evaluate(&string_or_default(args, "expression")) })
    }
}
