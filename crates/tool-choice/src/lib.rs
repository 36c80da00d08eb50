//! Demonstrations of the tool-choice directive: stub tools and three ready
//! made assistants, one per [`ToolChoice`](tool_choice_model::ToolChoice)
//! mode.
//!
//! The crate includes a CLI tool for trying the scenarios against the
//! Anthropic API. The scenarios can also be driven by any other model
//! provider, which is how the tests run them.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod scenario;
pub mod tools;

pub use scenario::Scenario;

/// Re-exports of [`tool_choice_core`] crate.
pub mod core {
    pub use tool_choice_core::*;
}
