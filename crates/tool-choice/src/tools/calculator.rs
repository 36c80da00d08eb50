use std::future::ready;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tool_choice_core::tool::{Error as ToolError, Tool, ToolResult};

#[derive(Deserialize, JsonSchema)]
pub struct CalculatorToolParameters {
    #[schemars(description = "The first number")]
    num1: f64,
    #[schemars(description = "The second number")]
    num2: f64,
    #[schemars(
        description = "The operation to perform: one of `add`, `subtract`, \
                       `multiply` or `divide`"
    )]
    operation: String,
}

/// Performs basic arithmetic on two numbers.
#[derive(Default)]
pub struct CalculatorTool;

impl Tool for CalculatorTool {
    type Input = CalculatorToolParameters;

    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "A simple calculator that performs basic arithmetic operations."
    }

    fn execute(
        &self,
        input: CalculatorToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let CalculatorToolParameters {
            num1,
            num2,
            operation,
        } = input;
        let result = match operation.as_str() {
            "add" => Ok(num1 + num2),
            "subtract" => Ok(num1 - num2),
            "multiply" => Ok(num1 * num2),
            "divide" if num2 == 0.0 => Err(ToolError::execution_error()
                .with_reason("cannot divide by zero")),
            "divide" => Ok(num1 / num2),
            _ => Err(ToolError::invalid_input()
                .with_reason(format!("unsupported operation `{operation}`"))),
        };
        ready(result.map(|value| json!({ "result": value })))
    }
}
