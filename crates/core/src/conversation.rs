//! Conversation-related types.

use tool_choice_model::{ModelMessage, Role};

/// The ordered turns sent with one request.
///
/// A conversation is built fresh for every call and is never stored.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<ModelMessage>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain text user turn.
    #[inline]
    pub fn with_user<S: Into<String>>(mut self, text: S) -> Self {
        self.turns.push(ModelMessage::user(text));
        self
    }

    /// Appends a plain text assistant turn.
    #[inline]
    pub fn with_assistant<S: Into<String>>(mut self, text: S) -> Self {
        self.turns.push(ModelMessage::assistant(text));
        self
    }

    /// Appends an arbitrary turn.
    #[inline]
    pub fn push(&mut self, turn: ModelMessage) {
        self.turns.push(turn);
    }

    /// Returns the turns in order.
    #[inline]
    pub fn turns(&self) -> &[ModelMessage] {
        &self.turns
    }

    /// Returns `true` if the conversation has no turns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns `true` if any turn comes from the user.
    #[inline]
    pub fn has_user_turn(&self) -> bool {
        self.turns.iter().any(|turn| turn.role == Role::User)
    }

    pub(crate) fn into_messages(self) -> Vec<ModelMessage> {
        self.turns
    }
}

impl From<&str> for Conversation {
    #[inline]
    fn from(text: &str) -> Self {
        Conversation::new().with_user(text)
    }
}

impl From<String> for Conversation {
    #[inline]
    fn from(text: String) -> Self {
        Conversation::new().with_user(text)
    }
}

impl From<ModelMessage> for Conversation {
    #[inline]
    fn from(turn: ModelMessage) -> Self {
        Self { turns: vec![turn] }
    }
}

impl From<Vec<ModelMessage>> for Conversation {
    #[inline]
    fn from(turns: Vec<ModelMessage>) -> Self {
        Self { turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn() {
        let conversation = Conversation::from("Why is the sky blue?");
        assert_eq!(
            conversation.turns(),
            &[ModelMessage::user("Why is the sky blue?")]
        );
        assert!(conversation.has_user_turn());
    }

    #[test]
    fn test_assistant_only() {
        let conversation = Conversation::new().with_assistant("Hello!");
        assert!(!conversation.is_empty());
        assert!(!conversation.has_user_turn());
    }
}
