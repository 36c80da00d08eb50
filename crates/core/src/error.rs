use tool_choice_model::{ErrorKind, ModelProviderError};

use crate::tool;

/// Errors surfaced by the request builder, the interpreter and the
/// tool registry.
///
/// Nothing here is retried internally, every error reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request is inconsistent, detected before anything is sent.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The model answered in a way the tool choice does not allow.
    #[error("unexpected outcome: {0}")]
    UnexpectedOutcome(String),
    /// The response cannot be interpreted at all.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// No executor is registered for the requested tool.
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
    /// The tool rejected its input or failed while running.
    #[error("tool error: {0}")]
    Tool(#[from] tool::Error),
    /// The model service failed or timed out.
    #[error("service error ({kind}): {message}")]
    Service {
        /// What went wrong, as reported by the provider.
        kind: ErrorKind,
        /// The provider's message.
        message: String,
    },
}

impl Error {
    pub(crate) fn configuration<S: Into<String>>(message: S) -> Self {
        Error::Configuration(message.into())
    }

    /// Converts a provider error. Responses the provider could not make
    /// sense of are reported as [`Error::MalformedResponse`], everything
    /// else is passed through as a service error.
    pub(crate) fn service(err: &dyn ModelProviderError) -> Self {
        match err.kind() {
            ErrorKind::MalformedResponse => {
                Error::MalformedResponse(err.to_string())
            }
            kind => Error::Service {
                kind,
                message: err.to_string(),
            },
        }
    }

    /// Returns the provider error kind for service errors.
    #[inline]
    pub fn service_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Service { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
