use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tool_choice_core::tool::{Error as ToolError, Tool, ToolResult};

#[derive(Deserialize, JsonSchema)]
pub struct SendTextToolParameters {
    #[schemars(description = "The piece of text to be sent to the user via \
                              text message.")]
    text: String,
}

/// Pretends to deliver an SMS to the user.
#[derive(Default)]
pub struct SendTextTool;

impl Tool for SendTextTool {
    type Input = SendTextToolParameters;

    fn name(&self) -> &str {
        "send_text_to_user"
    }

    fn description(&self) -> &str {
        "Sends a text message to a user"
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: SendTextToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        async move {
            if input.text.trim().is_empty() {
                return Err(ToolError::invalid_input()
                    .with_reason("`text` must not be empty"));
            }
            info!("TEXT MESSAGE SENT: {}", input.text);
            Ok(json!({ "delivered": true }))
        }
    }
}
