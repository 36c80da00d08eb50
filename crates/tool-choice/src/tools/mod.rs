//! Stub tools used by the demo scenarios.
//!
//! None of them talk to a real service. They return canned data so the
//! scenarios can be run end to end.

mod calculator;
mod customer_info;
mod send_text;
mod sentiment;
mod web_search;

pub use calculator::CalculatorTool;
pub use customer_info::CustomerInfoTool;
pub use send_text::SendTextTool;
pub use sentiment::SentimentScoresTool;
pub use web_search::WebSearchTool;
