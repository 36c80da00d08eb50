use std::fmt::{self, Display, Formatter};

use crate::response::ContentBlock;
use crate::schema::InputSchema;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRequest {
    /// The system instructions, if any.
    pub system: Option<String>,
    /// The input messages.
    pub messages: Vec<ModelMessage>,
    /// Tools that are available to the model.
    pub tools: Vec<ModelTool>,
    /// How the model is allowed to pick tools from `tools`.
    pub tool_choice: ToolChoice,
    /// Upper bound of tokens the model may generate.
    pub max_tokens: u32,
}

impl ModelRequest {
    /// Finds a tool in the catalog by its name.
    #[inline]
    pub fn tool(&self, name: &str) -> Option<&ModelTool> {
        self.tools.iter().find(|tool| tool.name == name)
    }
}

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The human side of the conversation.
    User,
    /// The model side of the conversation.
    Assistant,
}

/// A complete message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelMessage {
    /// Who wrote this message.
    pub role: Role,
    /// The content of this message.
    pub content: MessageContent,
}

impl ModelMessage {
    /// Creates a plain text user message.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Creates a plain text assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }
}

/// The content of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text.
    Text(String),
    /// An ordered sequence of content blocks.
    Blocks(Vec<ContentBlock>),
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelTool {
    /// Name of the tool, unique within a catalog.
    pub name: String,
    /// Description of the tool.
    ///
    /// This is a hint for the model only, nothing validates it.
    pub description: String,
    /// Parameters accepted by the tool.
    pub input_schema: InputSchema,
}

/// Controls whether and how strictly the model must call a tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolChoice {
    /// The model decides whether to answer in text or to call any tool.
    #[default]
    Auto,
    /// The model must call the tool with the given name.
    Forced(String),
    /// The model must call a tool, but it picks which one.
    Any,
}

impl ToolChoice {
    /// Creates a [`ToolChoice::Forced`] for the given tool name.
    #[inline]
    pub fn forced<S: Into<String>>(name: S) -> Self {
        ToolChoice::Forced(name.into())
    }

    /// Returns `true` if the model is obliged to call some tool.
    #[inline]
    pub fn requires_tool(&self) -> bool {
        !matches!(self, ToolChoice::Auto)
    }

    /// Returns the forced tool name, if any.
    #[inline]
    pub fn forced_name(&self) -> Option<&str> {
        match self {
            ToolChoice::Forced(name) => Some(name),
            _ => None,
        }
    }
}

impl Display for ToolChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ToolChoice::Auto => f.write_str("auto"),
            ToolChoice::Forced(name) => write!(f, "tool({name})"),
            ToolChoice::Any => f.write_str("any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_choice_helpers() {
        assert_eq!(ToolChoice::default(), ToolChoice::Auto);
        assert!(!ToolChoice::Auto.requires_tool());
        assert!(ToolChoice::Any.requires_tool());

        let forced = ToolChoice::forced("web_search");
        assert!(forced.requires_tool());
        assert_eq!(forced.forced_name(), Some("web_search"));
        assert_eq!(ToolChoice::Any.forced_name(), None);
        assert_eq!(forced.to_string(), "tool(web_search)");
    }

    #[test]
    fn test_find_tool() {
        let req = ModelRequest {
            system: None,
            messages: vec![ModelMessage::user("Hi")],
            tools: vec![ModelTool {
                name: "web_search".to_owned(),
                description: "Searches the web".to_owned(),
                input_schema: InputSchema::new(),
            }],
            tool_choice: ToolChoice::Auto,
            max_tokens: 16,
        };
        assert!(req.tool("web_search").is_some());
        assert!(req.tool("calculator").is_none());
    }
}
