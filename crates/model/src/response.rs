use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete response from the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The identifier assigned by the provider.
    pub id: String,
    /// Content blocks in the order the model produced them.
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating, if the provider reported it.
    pub stop_reason: Option<StopReason>,
}

impl ModelResponse {
    /// Returns the last content block of this response.
    #[inline]
    pub fn last_block(&self) -> Option<&ContentBlock> {
        self.content.last()
    }
}

/// The reason why a model response has finished.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model has finished its turn naturally.
    EndTurn,
    /// The output hit the `max_tokens` bound.
    MaxTokens,
    /// A custom stop sequence was generated.
    StopSequence,
    /// The model stopped to call a tool.
    ToolUse,
    /// Any reason this crate does not know about.
    #[serde(other)]
    Other,
}

/// One unit of a model response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Prose text.
    Text {
        /// The text body.
        text: String,
    },
    /// A request to call a tool.
    ToolUse(ToolCallRequest),
}

impl ContentBlock {
    /// Creates a text block.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// Arguments keyed by parameter name.
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    /// Creates a request from the arguments the model produced.
    ///
    /// Tool arguments are always a JSON object. Any other value is handed
    /// back as the error so that the caller can report it.
    pub fn try_new<I, N>(
        id: I,
        name: N,
        arguments: Value,
    ) -> Result<Self, Value>
    where
        I: Into<String>,
        N: Into<String>,
    {
        let Value::Object(arguments) = arguments else {
            return Err(arguments);
        };
        Ok(Self {
            id: id.into(),
            name: name.into(),
            arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_content_block_shape() {
        let call = ToolCallRequest::try_new(
            "toolu_01",
            "web_search",
            json!({ "topic": "2024 Miami Grand Prix winner" }),
        );
        let block = ContentBlock::ToolUse(call.unwrap());
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "tool_use",
                "id": "toolu_01",
                "name": "web_search",
                "arguments": { "topic": "2024 Miami Grand Prix winner" }
            })
        );
    }

    #[test]
    fn test_unknown_stop_reason() {
        let reason: StopReason = serde_json::from_str("\"refusal\"").unwrap();
        assert_eq!(reason, StopReason::Other);
        let reason: StopReason = serde_json::from_str("\"tool_use\"").unwrap();
        assert_eq!(reason, StopReason::ToolUse);
    }

    #[test]
    fn test_non_object_arguments() {
        let input = json!("2024 Miami Grand Prix winner");
        let err = ToolCallRequest::try_new("1", "web_search", input.clone());
        assert_eq!(err, Err(input));

        let req =
            ToolCallRequest::try_new("1", "web_search", json!({})).unwrap();
        assert!(req.arguments.is_empty());
    }
}
