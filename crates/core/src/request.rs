//! Request construction with caller-side precondition checks.

use std::collections::HashSet;

use tool_choice_model::{ModelRequest, ModelTool, ToolChoice};

use crate::conversation::Conversation;
use crate::error::Error;

/// The output bound used when none is given.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Assembles one [`ModelRequest`].
///
/// [`RequestBuilder::build`] checks everything the remote service would
/// otherwise handle inconsistently, so a bad configuration fails before
/// any network cost is incurred.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    conversation: Conversation,
    system: Option<String>,
    tools: Vec<ModelTool>,
    tool_choice: ToolChoice,
    max_tokens: u32,
}

impl RequestBuilder {
    /// Creates a builder for the given conversation.
    #[inline]
    pub fn new(conversation: impl Into<Conversation>) -> Self {
        Self {
            conversation: conversation.into(),
            system: None,
            tools: vec![],
            tool_choice: ToolChoice::Auto,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the system directive.
    #[inline]
    pub fn with_system<S: Into<String>>(mut self, system: S) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Appends tools to the catalog.
    #[inline]
    pub fn with_tools(
        mut self,
        tools: impl IntoIterator<Item = ModelTool>,
    ) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Sets the tool choice.
    #[inline]
    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    /// Sets the maximum number of tokens to generate.
    #[inline]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Validates and builds the request.
    pub fn build(self) -> Result<ModelRequest, Error> {
        if self.conversation.is_empty() {
            return Err(Error::configuration("the conversation is empty"));
        }
        if !self.conversation.has_user_turn() {
            return Err(Error::configuration(
                "the conversation has no user turn",
            ));
        }
        if self.max_tokens == 0 {
            return Err(Error::configuration("`max_tokens` must be positive"));
        }
        validate_catalog(&self.tools, &self.tool_choice)?;

        Ok(ModelRequest {
            system: self.system,
            messages: self.conversation.into_messages(),
            tools: self.tools,
            tool_choice: self.tool_choice,
            max_tokens: self.max_tokens,
        })
    }
}

/// Checks that the catalog is well-formed and compatible with the tool
/// choice.
pub(crate) fn validate_catalog(
    tools: &[ModelTool],
    tool_choice: &ToolChoice,
) -> Result<(), Error> {
    let mut names = HashSet::with_capacity(tools.len());
    for tool in tools {
        if tool.name.is_empty() {
            return Err(Error::configuration("a tool has an empty name"));
        }
        if !names.insert(tool.name.as_str()) {
            return Err(Error::configuration(format!(
                "tool `{}` is declared more than once",
                tool.name
            )));
        }
    }

    match tool_choice {
        ToolChoice::Auto => Ok(()),
        ToolChoice::Forced(name) if names.contains(name.as_str()) => Ok(()),
        ToolChoice::Forced(name) => Err(Error::configuration(format!(
            "forced tool `{name}` is not in the catalog"
        ))),
        ToolChoice::Any if tools.is_empty() => Err(Error::configuration(
            "tool choice `any` needs at least one tool",
        )),
        ToolChoice::Any => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use tool_choice_model::{InputSchema, ModelMessage};

    use super::*;

    fn tool(name: &str) -> ModelTool {
        ModelTool {
            name: name.to_owned(),
            description: format!("The {name} tool"),
            input_schema: InputSchema::new(),
        }
    }

    fn assert_configuration_error(result: Result<ModelRequest, Error>) {
        assert!(
            matches!(result, Err(Error::Configuration(_))),
            "expected a configuration error: {result:?}"
        );
    }

    #[test]
    fn test_build_request() {
        let req = RequestBuilder::new("How are you?")
            .with_system("Be brief.")
            .with_tools([tool("web_search")])
            .with_max_tokens(200)
            .build()
            .unwrap();
        assert_eq!(req.system.as_deref(), Some("Be brief."));
        assert_eq!(req.messages, vec![ModelMessage::user("How are you?")]);
        assert_eq!(req.tools.len(), 1);
        assert_eq!(req.tool_choice, ToolChoice::Auto);
        assert_eq!(req.max_tokens, 200);
    }

    #[test]
    fn test_auto_without_tools() {
        let req = RequestBuilder::new("Why is the sky blue?").build().unwrap();
        assert!(req.tools.is_empty());
        assert_eq!(req.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_forced_tool_must_exist() {
        assert_configuration_error(
            RequestBuilder::new("Hi")
                .with_tools([tool("print_sentiment_scores")])
                .with_tool_choice(ToolChoice::forced("missing_tool"))
                .build(),
        );

        let req = RequestBuilder::new("Hi")
            .with_tools([tool("calculator"), tool("print_sentiment_scores")])
            .with_tool_choice(ToolChoice::forced("print_sentiment_scores"))
            .build();
        assert!(req.is_ok());
    }

    #[test]
    fn test_any_needs_tools() {
        assert_configuration_error(
            RequestBuilder::new("Hi")
                .with_tool_choice(ToolChoice::Any)
                .build(),
        );
    }

    #[test]
    fn test_invalid_catalog() {
        assert_configuration_error(
            RequestBuilder::new("Hi")
                .with_tools([tool("web_search"), tool("web_search")])
                .build(),
        );
        assert_configuration_error(
            RequestBuilder::new("Hi").with_tools([tool("")]).build(),
        );
    }

    #[test]
    fn test_invalid_conversation() {
        assert_configuration_error(
            RequestBuilder::new(Conversation::new()).build(),
        );
        assert_configuration_error(
            RequestBuilder::new(Conversation::new().with_assistant("Hello"))
                .build(),
        );
        assert_configuration_error(
            RequestBuilder::new("Hi").with_max_tokens(0).build(),
        );
    }
}
