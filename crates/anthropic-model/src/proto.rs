use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tool_choice_model::{
    ContentBlock, ErrorKind, InputSchema, MessageContent, ModelMessage,
    ModelRequest, ModelResponse, ModelTool, Role, StopReason,
    ToolCallRequest, ToolChoice,
};

use crate::{AnthropicConfig, Error};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub content: Vec<ResponseBlock>,
    pub stop_reason: Option<StopReason>,
    pub usage: Option<Usage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub r#type: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RequestBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Map<String, Value>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Blocks(Vec<RequestBlock>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Message {
    role: &'static str,
    content: Content,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Tool {
    name: String,
    description: String,
    input_schema: InputSchema,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireToolChoice {
    Auto,
    Any,
    Tool { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<WireToolChoice>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &AnthropicConfig,
) -> MessagesRequest {
    // The API rejects `tool_choice` without tools.
    let tool_choice = if req.tools.is_empty() {
        None
    } else {
        Some(create_tool_choice(&req.tool_choice))
    };
    MessagesRequest {
        model: config.model.clone(),
        max_tokens: req.max_tokens,
        system: req.system.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        tools: req.tools.iter().map(create_tool).collect(),
        tool_choice,
    }
}

#[inline]
fn create_tool_choice(choice: &ToolChoice) -> WireToolChoice {
    match choice {
        ToolChoice::Auto => WireToolChoice::Auto,
        ToolChoice::Any => WireToolChoice::Any,
        ToolChoice::Forced(name) => WireToolChoice::Tool { name: name.clone() },
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let content = match &msg.content {
        MessageContent::Text(text) => Content::Text(text.clone()),
        MessageContent::Blocks(blocks) => Content::Blocks(
            blocks
                .iter()
                .map(|block| match block {
                    ContentBlock::Text { text } => {
                        RequestBlock::Text { text: text.clone() }
                    }
                    ContentBlock::ToolUse(call) => RequestBlock::ToolUse {
                        id: call.id.clone(),
                        name: call.name.clone(),
                        input: call.arguments.clone(),
                    },
                })
                .collect(),
        ),
    };
    Message { role, content }
}

#[inline]
fn create_tool(tool: &ModelTool) -> Tool {
    Tool {
        name: tool.name.clone(),
        description: tool.description.clone(),
        input_schema: tool.input_schema.clone(),
    }
}

/// Converts a response from the server.
///
/// Fails if a tool call carries non-object input, or if the response ends
/// with a block of a type this crate does not know. Leading unknown blocks
/// (e.g. `thinking`) are skipped, since only the last block decides the
/// outcome.
pub fn create_response(
    resp: MessagesResponse,
) -> Result<ModelResponse, Error> {
    if let Some(usage) = resp.usage {
        debug!(
            "usage of {}: {} input tokens, {} output tokens",
            resp.id, usage.input_tokens, usage.output_tokens
        );
    }
    if resp.content.last() == Some(&ResponseBlock::Unsupported) {
        return Err(Error::new(
            format!("response {} ends with an unsupported block", resp.id),
            ErrorKind::MalformedResponse,
        ));
    }

    let mut content = Vec::with_capacity(resp.content.len());
    for block in resp.content {
        match block {
            ResponseBlock::Text { text } => {
                content.push(ContentBlock::Text { text });
            }
            ResponseBlock::ToolUse { id, name, input } => {
                let call = ToolCallRequest::try_new(id, name, input)
                    .map_err(|input| {
                        Error::new(
                            format!(
                                "tool call input in response {} is not an \
                                 object: {input}",
                                resp.id
                            ),
                            ErrorKind::MalformedResponse,
                        )
                    })?;
                content.push(ContentBlock::ToolUse(call));
            }
            ResponseBlock::Unsupported => {
                warn!("skipping an unsupported content block");
            }
        }
    }
    Ok(ModelResponse {
        id: resp.id,
        content,
        stop_reason: resp.stop_reason,
    })
}

pub fn error_kind_for_status(status: u16) -> ErrorKind {
    match status {
        400 | 404 | 413 | 422 => ErrorKind::InvalidRequest,
        401 | 403 => ErrorKind::Authentication,
        429 => ErrorKind::RateLimitExceeded,
        503 | 529 => ErrorKind::Overloaded,
        408 | 504 => ErrorKind::Timeout,
        _ => ErrorKind::Other,
    }
}

/// Extracts the message from an error body, falling back to the raw
/// body text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) => format!("{}: {}", resp.error.r#type, resp.error.message),
        Err(_) => body.to_owned(),
    }
}
