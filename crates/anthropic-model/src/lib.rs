//! A model provider for the Anthropic Messages API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use reqwest::{Client, Response, header};
use tool_choice_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};

pub use config::{AnthropicConfig, AnthropicConfigBuilder};
use proto::MessagesResponse;

/// Error type for [`AnthropicProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Anthropic Messages API model provider.
#[derive(Clone, Debug)]
pub struct AnthropicProvider {
    client: Client,
    config: Arc<AnthropicConfig>,
}

impl AnthropicProvider {
    /// Creates a new `AnthropicProvider` with the given configuration.
    #[inline]
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ModelProvider for AnthropicProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let body = proto::create_request(req, &self.config);
        let resp_fut = self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .timeout(self.config.timeout)
            .json(&body)
            .send();
        let tool_choice = req.tool_choice.clone();

        async move {
            debug!("sending a message request (tool choice: {tool_choice})");
            let resp = resp_fut.await.map_err(Error::from_reqwest)?;

            let status = resp.status();
            if !status.is_success() {
                let kind = proto::error_kind_for_status(status.as_u16());
                let body = resp.text().await.unwrap_or_default();
                let message = proto::error_message(&body);
                warn!("request failed with {status}: {message}");
                return Err(Error::new(format!("{status}: {message}"), kind));
            }

            if !is_json(&resp) {
                let content_type = resp.headers().get(header::CONTENT_TYPE);
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::Other,
                ));
            }

            // Here we got a successful response.
            let resp: MessagesResponse =
                resp.json().await.map_err(Error::from_reqwest)?;
            trace!("got a response: {resp:?}");
            proto::create_response(resp)
        }
    }
}

#[inline]
fn is_json(resp: &Response) -> bool {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .map(|m: Mime| {
            m.type_() == mime::APPLICATION && m.subtype() == mime::JSON
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tool_choice_model::{ModelMessage, ToolChoice};

    use super::*;

    #[tokio::test]
    async fn test_connection_error() {
        let config = AnthropicConfigBuilder::with_api_key("sk-ant-test")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(5))
            .build();
        let provider = AnthropicProvider::new(config);
        let req = ModelRequest {
            system: None,
            messages: vec![ModelMessage::user("Hi")],
            tools: vec![],
            tool_choice: ToolChoice::Auto,
            max_tokens: 16,
        };

        let err = provider.send_request(&req).await.unwrap_err();
        assert_ne!(err.kind(), ErrorKind::Authentication);
        assert!(!err.message().is_empty());
    }
}
