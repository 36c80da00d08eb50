use std::time::Duration;

use tool_choice_model::{ModelProvider, ModelTool, ToolChoice};

use super::Assistant;
use crate::error::Error;
use crate::model_client::{DEFAULT_TIMEOUT, ModelClient};
use crate::request::{DEFAULT_MAX_TOKENS, validate_catalog};
use crate::tool::{Registry, Tool};

/// [`Assistant`] builder.
pub struct AssistantBuilder {
    model_client: ModelClient,
    system_prompt: Option<String>,
    catalog: Vec<ModelTool>,
    registry: Registry,
    tool_choice: ToolChoice,
    max_tokens: u32,
    timeout: Duration,
    deferred_error: Option<Error>,
}

impl AssistantBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            system_prompt: None,
            catalog: vec![],
            registry: Registry::default(),
            tool_choice: ToolChoice::Auto,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
            deferred_error: None,
        }
    }

    /// Sets the system prompt.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Registers a tool, both in the catalog and as an executor.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        match self.registry.add_tool(tool) {
            Ok(definition) => self.catalog.push(definition),
            Err(err) => {
                self.deferred_error.get_or_insert(err);
            }
        }
        self
    }

    /// Adds a tool to the catalog without an executor.
    ///
    /// The model may still call it, [`Assistant::respond`] then fails with
    /// [`Error::UnknownTool`].
    #[inline]
    pub fn with_tool_definition(mut self, definition: ModelTool) -> Self {
        self.catalog.push(definition);
        self
    }

    /// Sets the default tool choice.
    #[inline]
    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    /// Sets the maximum number of tokens to generate per call.
    #[inline]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets how long a single round trip may take.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the assistant.
    ///
    /// The catalog and the default tool choice are validated here, so
    /// misconfiguration is reported before the first call.
    pub fn build(self) -> Result<Assistant, Error> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }
        validate_catalog(&self.catalog, &self.tool_choice)?;
        if self.max_tokens == 0 {
            return Err(Error::configuration("`max_tokens` must be positive"));
        }

        let mut model_client = self.model_client;
        model_client.set_timeout(self.timeout);
        Ok(Assistant {
            model_client,
            system_prompt: self.system_prompt,
            catalog: self.catalog,
            registry: self.registry,
            tool_choice: self.tool_choice,
            max_tokens: self.max_tokens,
        })
    }
}
