//! Core logic: request construction, response interpretation, tool
//! dispatch and the [`Assistant`] that ties them together.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod assistant;
pub mod conversation;
mod error;
pub mod interpret;
mod model_client;
pub mod request;
pub mod tool;

pub use assistant::{Assistant, AssistantBuilder, Resolution};
pub use conversation::Conversation;
pub use error::Error;
pub use interpret::{Outcome, interpret};
pub use model_client::DEFAULT_TIMEOUT;
pub use request::RequestBuilder;
pub use tool::Tool;
