use serde::{Deserialize, Serialize};
use tool_choice_model::{ContentBlock, ErrorKind, StopReason};

/// The preset response for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetResponse {
    /// Content blocks in this response.
    pub content: Vec<ContentBlock>,
    /// Overrides the stop reason, which is otherwise derived from the
    /// content.
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    /// If set, the request fails with this kind of error instead.
    #[serde(default)]
    pub failure: Option<ErrorKind>,
}

impl PresetResponse {
    /// Creates a `PresetResponse` with the specified content blocks.
    #[inline]
    pub fn with_content(content: impl Into<Vec<ContentBlock>>) -> Self {
        Self {
            content: content.into(),
            stop_reason: None,
            failure: None,
        }
    }

    /// Creates a `PresetResponse` that fails with the given error kind.
    #[inline]
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            content: vec![],
            stop_reason: None,
            failure: Some(kind),
        }
    }

    /// Sets the stop reason explicitly.
    #[inline]
    pub fn with_stop_reason(mut self, stop_reason: StopReason) -> Self {
        self.stop_reason = Some(stop_reason);
        self
    }

    /// Returns the stop reason this response will report.
    pub fn effective_stop_reason(&self) -> StopReason {
        if let Some(stop_reason) = self.stop_reason {
            return stop_reason;
        }
        let has_tool_call = self
            .content
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolUse(_)));
        if has_tool_call {
            StopReason::ToolUse
        } else {
            StopReason::EndTurn
        }
    }
}
