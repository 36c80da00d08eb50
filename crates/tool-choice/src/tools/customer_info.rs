use std::future::ready;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tool_choice_core::tool::{Error as ToolError, Tool, ToolResult};

#[derive(Deserialize, JsonSchema)]
pub struct CustomerInfoToolParameters {
    #[schemars(description = "The username of the user in question.")]
    username: String,
}

/// Looks customers up in a fixed, in-memory table.
#[derive(Default)]
pub struct CustomerInfoTool;

impl CustomerInfoTool {
    fn lookup(username: &str) -> Option<Value> {
        match username {
            "jenny76" => Some(json!({
                "username": "jenny76",
                "email": "jenny76@gmail.com",
                "purchases": [
                    { "id": 1, "product": "computer mouse" },
                    { "id": 2, "product": "screen protector" },
                    { "id": 3, "product": "usb charging cable" }
                ]
            })),
            _ => None,
        }
    }
}

impl Tool for CustomerInfoTool {
    type Input = CustomerInfoToolParameters;

    fn name(&self) -> &str {
        "get_customer_info"
    }

    fn description(&self) -> &str {
        "Returns information about the customer based on their username. \
         Includes their email and a list of past purchases."
    }

    fn execute(
        &self,
        input: CustomerInfoToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let result = Self::lookup(&input.username).ok_or_else(|| {
            ToolError::execution_error()
                .with_reason(format!("no customer named `{}`", input.username))
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use tool_choice_core::tool::ErrorKind as ToolErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_lookup() {
        let output = CustomerInfoTool
            .execute(CustomerInfoToolParameters {
                username: "jenny76".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(output["email"], "jenny76@gmail.com");
        assert_eq!(output["purchases"].as_array().unwrap().len(), 3);

        let err = CustomerInfoTool
            .execute(CustomerInfoToolParameters {
                username: "nobody".to_owned(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::ExecutionError);
    }
}
