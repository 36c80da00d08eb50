mod builder;

use serde_json::Value;
use tool_choice_model::{ModelRequest, ModelTool, ToolCallRequest, ToolChoice};

use crate::conversation::Conversation;
use crate::error::Error;
use crate::interpret::{Outcome, interpret};
use crate::model_client::ModelClient;
use crate::request::RequestBuilder;
use crate::tool::Registry;
pub use builder::AssistantBuilder;

/// A configured assistant: a model provider, a system directive, a tool
/// catalog and a tool choice, reused across calls.
///
/// Every call is independent and one round trip long, nothing from a call
/// is kept afterwards. Clones share the provider, so independent calls
/// may run concurrently.
#[derive(Clone)]
pub struct Assistant {
    model_client: ModelClient,
    system_prompt: Option<String>,
    catalog: Vec<ModelTool>,
    registry: Registry,
    tool_choice: ToolChoice,
    max_tokens: u32,
}

/// The result of [`Assistant::respond`].
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The model answered in text.
    Answer(String),
    /// The model called a tool, which has been run.
    ToolExecuted {
        /// The call the model requested.
        call: ToolCallRequest,
        /// What the tool returned.
        output: Value,
    },
}

impl Assistant {
    /// Returns the tool catalog sent with every request.
    #[inline]
    pub fn catalog(&self) -> &[ModelTool] {
        &self.catalog
    }

    /// Returns the default tool choice.
    #[inline]
    pub fn tool_choice(&self) -> &ToolChoice {
        &self.tool_choice
    }

    /// Sends the conversation with the default tool choice and classifies
    /// the response.
    #[inline]
    pub async fn ask(
        &self,
        conversation: impl Into<Conversation>,
    ) -> Result<Outcome, Error> {
        self.ask_with_choice(conversation, self.tool_choice.clone())
            .await
    }

    /// Like [`Assistant::ask`], but overrides the tool choice for this
    /// call only.
    pub async fn ask_with_choice(
        &self,
        conversation: impl Into<Conversation>,
        tool_choice: ToolChoice,
    ) -> Result<Outcome, Error> {
        let req = self.build_request(conversation.into(), tool_choice)?;
        debug!(
            "asking with {} tool(s), tool choice {}",
            req.tools.len(),
            req.tool_choice
        );
        let resp = self.model_client.send_request(&req).await?;
        let outcome = interpret(&req, &resp)?;
        trace!("interpreted {} as {outcome:?}", resp.id);
        Ok(outcome)
    }

    /// Asks, then runs the requested tool if the outcome is a tool call.
    pub async fn respond(
        &self,
        conversation: impl Into<Conversation>,
    ) -> Result<Resolution, Error> {
        match self.ask(conversation).await? {
            Outcome::PlainAnswer(text) => Ok(Resolution::Answer(text)),
            Outcome::ToolCall(call) => {
                let output = self.registry.execute(&call).await?;
                Ok(Resolution::ToolExecuted { call, output })
            }
        }
    }

    fn build_request(
        &self,
        conversation: Conversation,
        tool_choice: ToolChoice,
    ) -> Result<ModelRequest, Error> {
        let mut builder = RequestBuilder::new(conversation)
            .with_tools(self.catalog.iter().cloned())
            .with_tool_choice(tool_choice)
            .with_max_tokens(self.max_tokens);
        if let Some(system_prompt) = &self.system_prompt {
            builder = builder.with_system(system_prompt.clone());
        }
        builder.build()
    }
}
