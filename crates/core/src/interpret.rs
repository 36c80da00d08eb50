//! Classification of a single model response.

use tool_choice_model::{
    ContentBlock, ModelRequest, ModelResponse, StopReason, ToolCallRequest,
    ToolChoice,
};

use crate::error::Error;

/// What the caller should do with a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Treat the output as the final text answer.
    PlainAnswer(String),
    /// Execute the named tool with the given arguments.
    ToolCall(ToolCallRequest),
}

impl Outcome {
    /// Returns the tool call, if this outcome is one.
    #[inline]
    pub fn as_tool_call(&self) -> Option<&ToolCallRequest> {
        match self {
            Outcome::ToolCall(call) => Some(call),
            Outcome::PlainAnswer(_) => None,
        }
    }
}

/// Classifies `resp`, which must be the response to `req`.
///
/// Only the last content block counts: the model may lead with any
/// amount of explanatory text, followed by at most one tool call. This is
/// a pure function of its inputs.
pub fn interpret(
    req: &ModelRequest,
    resp: &ModelResponse,
) -> Result<Outcome, Error> {
    let Some(last) = resp.last_block() else {
        return Err(Error::MalformedResponse(format!(
            "response {} has no content blocks",
            resp.id
        )));
    };

    if resp.stop_reason == Some(StopReason::MaxTokens) {
        warn!("response {} was truncated by `max_tokens`", resp.id);
    }

    match last {
        ContentBlock::Text { text } => {
            if req.tool_choice.requires_tool() {
                return Err(Error::UnexpectedOutcome(format!(
                    "got a text answer although tool choice `{}` requires \
                     a tool call",
                    req.tool_choice
                )));
            }
            if resp.stop_reason == Some(StopReason::ToolUse) {
                warn!(
                    "response {} stopped for tool use but ends with text",
                    resp.id
                );
            }
            Ok(Outcome::PlainAnswer(text.clone()))
        }
        ContentBlock::ToolUse(call) => {
            if let ToolChoice::Forced(name) = &req.tool_choice {
                if &call.name != name {
                    return Err(Error::UnexpectedOutcome(format!(
                        "tool `{name}` was forced but the model called `{}`",
                        call.name
                    )));
                }
            }
            if req.tool(&call.name).is_none() {
                return Err(Error::UnexpectedOutcome(format!(
                    "the model called `{}` which is not in the catalog",
                    call.name
                )));
            }
            if let Some(reason) = resp.stop_reason {
                if reason != StopReason::ToolUse {
                    warn!(
                        "response {} ends with a tool call but stopped with \
                         {reason:?}",
                        resp.id
                    );
                }
            }
            let dropped = resp
                .content
                .iter()
                .filter(|block| matches!(block, ContentBlock::ToolUse(_)))
                .count()
                - 1;
            if dropped > 0 {
                debug!("ignoring {dropped} earlier tool call(s)");
            }
            Ok(Outcome::ToolCall(call.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tool_choice_model::{
        InputSchema, ModelMessage, ModelTool, ParameterType,
    };

    use super::*;

    fn tool(name: &str) -> ModelTool {
        ModelTool {
            name: name.to_owned(),
            description: format!("The {name} tool"),
            input_schema: InputSchema::new().with_parameter(
                "input",
                ParameterType::String,
                "Anything",
                false,
            ),
        }
    }

    fn request(tools: &[&str], tool_choice: ToolChoice) -> ModelRequest {
        ModelRequest {
            system: None,
            messages: vec![ModelMessage::user("Hi")],
            tools: tools.iter().map(|name| tool(name)).collect(),
            tool_choice,
            max_tokens: 1024,
        }
    }

    fn response(content: Vec<ContentBlock>) -> ModelResponse {
        let stop_reason = match content.last() {
            Some(ContentBlock::ToolUse(_)) => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        };
        ModelResponse {
            id: "msg_01".to_owned(),
            content,
            stop_reason: Some(stop_reason),
        }
    }

    fn tool_use(name: &str, arguments: serde_json::Value) -> ContentBlock {
        let call = ToolCallRequest::try_new("toolu_01", name, arguments);
        ContentBlock::ToolUse(call.unwrap())
    }

    #[test]
    fn test_auto_plain_answer() {
        let req = request(&["web_search"], ToolChoice::Auto);
        let resp = response(vec![ContentBlock::text(
            "The sky is blue due to Rayleigh scattering.",
        )]);
        assert_eq!(
            interpret(&req, &resp).unwrap(),
            Outcome::PlainAnswer(
                "The sky is blue due to Rayleigh scattering.".to_owned()
            )
        );
    }

    #[test]
    fn test_auto_tool_call() {
        let req = request(&["web_search"], ToolChoice::Auto);
        let resp = response(vec![tool_use(
            "web_search",
            json!({ "topic": "2024 Miami Grand Prix winner" }),
        )]);
        let outcome = interpret(&req, &resp).unwrap();
        let call = outcome.as_tool_call().unwrap();
        assert_eq!(call.name, "web_search");
        assert_eq!(
            call.arguments.get("topic"),
            Some(&json!("2024 Miami Grand Prix winner"))
        );
    }

    #[test]
    fn test_forced_tool_call() {
        let req = request(
            &["calculator", "print_sentiment_scores"],
            ToolChoice::forced("print_sentiment_scores"),
        );
        let arguments = json!({
            "positive_score": 0.9,
            "negative_score": 0.0,
            "neutral_score": 0.1
        });
        let resp = response(vec![tool_use(
            "print_sentiment_scores",
            arguments.clone(),
        )]);
        let outcome = interpret(&req, &resp).unwrap();
        let call = outcome.as_tool_call().unwrap();
        assert_eq!(call.name, "print_sentiment_scores");
        let received = serde_json::Value::Object(call.arguments.clone());
        assert_eq!(received, arguments);
    }

    #[test]
    fn test_text_when_tool_required() {
        for tool_choice in [ToolChoice::forced("web_search"), ToolChoice::Any] {
            let req = request(&["web_search"], tool_choice);
            let resp = response(vec![ContentBlock::text("Sure thing!")]);
            assert!(matches!(
                interpret(&req, &resp),
                Err(Error::UnexpectedOutcome(_))
            ));
        }
    }

    #[test]
    fn test_forced_tool_mismatch() {
        let req = request(
            &["calculator", "print_sentiment_scores"],
            ToolChoice::forced("print_sentiment_scores"),
        );
        let resp = response(vec![tool_use("calculator", json!({}))]);
        assert!(matches!(
            interpret(&req, &resp),
            Err(Error::UnexpectedOutcome(_))
        ));
    }

    #[test]
    fn test_tool_outside_catalog() {
        let req = request(&["web_search"], ToolChoice::Any);
        let resp = response(vec![tool_use("rm_rf", json!({}))]);
        assert!(matches!(
            interpret(&req, &resp),
            Err(Error::UnexpectedOutcome(_))
        ));
    }

    #[test]
    fn test_any_uses_last_block() {
        let req = request(
            &["send_text_to_user", "get_customer_info"],
            ToolChoice::Any,
        );
        let resp = response(vec![
            ContentBlock::text("Let me look up your orders."),
            tool_use("get_customer_info", json!({ "username": "jenny76" })),
        ]);
        let outcome = interpret(&req, &resp).unwrap();
        let call = outcome.as_tool_call().unwrap();
        assert_eq!(call.name, "get_customer_info");
        assert_eq!(call.arguments.get("username"), Some(&json!("jenny76")));
    }

    #[test]
    fn test_only_last_tool_call_counts() {
        let req = request(&["web_search"], ToolChoice::Auto);
        let resp = response(vec![
            tool_use("web_search", json!({ "topic": "first" })),
            tool_use("web_search", json!({ "topic": "second" })),
        ]);
        let outcome = interpret(&req, &resp).unwrap();
        let call = outcome.as_tool_call().unwrap();
        assert_eq!(call.arguments.get("topic"), Some(&json!("second")));
    }

    #[test]
    fn test_empty_response() {
        let req = request(&[], ToolChoice::Auto);
        let resp = response(vec![]);
        assert!(matches!(
            interpret(&req, &resp),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let req = request(&["web_search"], ToolChoice::Auto);
        let resp = response(vec![
            ContentBlock::text("Searching."),
            tool_use("web_search", json!({ "topic": "rust" })),
        ]);
        let first = interpret(&req, &resp).unwrap();
        let second = interpret(&req, &resp).unwrap();
        assert_eq!(first, second);
    }
}
