use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request was rejected by the provider as invalid.
    InvalidRequest,
    /// The credentials are missing or not accepted.
    Authentication,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// The model provider is temporarily overloaded.
    Overloaded,
    /// The request did not finish in time.
    Timeout,
    /// The provider answered with something that is not a valid response.
    MalformedResponse,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Authentication => "authentication failed",
            ErrorKind::RateLimitExceeded => "rate limit exceeded",
            ErrorKind::Overloaded => "overloaded",
            ErrorKind::Timeout => "timed out",
            ErrorKind::MalformedResponse => "malformed response",
            ErrorKind::Other => "other error",
        };
        f.write_str(s)
    }
}
