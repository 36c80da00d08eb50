use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use serde_json::{Map, Value, json};
use tokio::time::sleep;
use tool_choice_model::{
    ContentBlock, ErrorKind, InputSchema, MessageContent, ModelMessage,
    ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
    ModelTool, ParameterType, StopReason, ToolCallRequest, ToolChoice,
};

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the user input, or calls the forced tool with the input as
/// its only argument.
struct FakeModelProvider;

impl ModelProvider for FakeModelProvider {
    type Error = FakeModelProviderError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let result = 'blk: {
            let Some(msg) = req.messages.first() else {
                break 'blk Err(FakeModelProviderError(
                    ErrorKind::InvalidRequest,
                ));
            };
            let input = match &msg.content {
                MessageContent::Text(text) => text.clone(),
                _ => unreachable!("unexpected message: {msg:?}"),
            };

            let (block, stop_reason) = match &req.tool_choice {
                ToolChoice::Forced(name) => (
                    ContentBlock::ToolUse(ToolCallRequest {
                        id: "call:0".to_owned(),
                        name: name.clone(),
                        arguments: Map::from_iter([(
                            "input".to_owned(),
                            Value::String(input),
                        )]),
                    }),
                    StopReason::ToolUse,
                ),
                _ => (
                    ContentBlock::text(format!("You said {input}")),
                    StopReason::EndTurn,
                ),
            };
            Ok(ModelResponse {
                id: "msg:0".to_owned(),
                content: vec![block],
                stop_reason: Some(stop_reason),
            })
        };
        async move {
            sleep(Duration::from_millis(1)).await;
            result
        }
    }
}

fn echo_tool() -> ModelTool {
    ModelTool {
        name: "echo".to_owned(),
        description: "Echoes the input".to_owned(),
        input_schema: InputSchema::new().with_parameter(
            "input",
            ParameterType::String,
            "The text to echo",
            true,
        ),
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            system: None,
            messages: vec![ModelMessage::user("Good morning")],
            tools: vec![],
            tool_choice: ToolChoice::Auto,
            max_tokens: 64,
        };
        let resp = provider.send_request(&req).await.unwrap();

        assert_eq!(
            resp.last_block(),
            Some(&ContentBlock::text("You said Good morning"))
        );
        assert_eq!(resp.stop_reason, Some(StopReason::EndTurn));
    }

    #[tokio::test]
    async fn test_forced_tool() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            system: Some("Always echo.".to_owned()),
            messages: vec![ModelMessage::user("ping")],
            tools: vec![echo_tool()],
            tool_choice: ToolChoice::forced("echo"),
            max_tokens: 64,
        };
        let resp = provider.send_request(&req).await.unwrap();

        let Some(ContentBlock::ToolUse(call)) = resp.last_block() else {
            panic!("expected a tool call: {resp:?}");
        };
        assert_eq!(call.name, "echo");
        assert_eq!(call.arguments.get("input"), Some(&json!("ping")));
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeModelProvider;
        let req = ModelRequest {
            system: None,
            messages: vec![],
            tools: vec![],
            tool_choice: ToolChoice::Auto,
            max_tokens: 64,
        };
        let result = provider.send_request(&req).await;
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }
}
