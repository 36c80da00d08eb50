//! An abstraction layer for tool-calling LLM services.
//!
//! This crate establishes a provider-neutral protocol for building a
//! single request (conversation, tool catalog and tool-choice directive)
//! and reading the single response it produces, so that callers can
//! switch between providers without modifying the core codebase.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;
mod schema;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
pub use schema::*;
