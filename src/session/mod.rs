//! Conversation state and the per-turn resolution machinery.
//!
//! [`Conversation`] is an explicit, append-only transcript passed into the
//! [`turn::TurnProcessor`] for every user input; nothing conversational
//! lives in ambient state, so a process could run several independent
//! conversations if it wanted to. [`repl::ChatLoop`] is the terminal
//! front-end that feeds it.

/// Terminal read-eval loop.
pub mod repl;
/// Per-turn tool-resolution loop.
pub mod turn;

pub use repl::ChatLoop;
pub use turn::{TurnConfig, TurnProcessor};

use crate::types::Message;

/// Append-only conversation transcript with an optional system prompt.
///
/// Messages are only ever pushed; committed entries are never mutated or
/// removed. The full ordered sequence is replayed to the model on every
/// inference call.
#[derive(Debug, Default)]
pub struct Conversation {
    system_prompt: Option<String>,
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation with no system prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty conversation with a system prompt.
    pub fn with_system(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: Some(system_prompt.into()),
            messages: Vec::new(),
        }
    }

    /// The system prompt, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The committed transcript, in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of committed messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    #[test]
    fn test_messages_round_trip_in_insertion_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("What is a linked list?"));
        conversation.push(Message::assistant("A sequence of nodes.", vec![]));

        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "What is a linked list?");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "A sequence of nodes.");
    }

    #[test]
    fn test_system_prompt() {
        let conversation = Conversation::with_system("You are a helpful assistant.");
        assert_eq!(
            conversation.system_prompt(),
            Some("You are a helpful assistant.")
        );
        assert!(conversation.is_empty());

        let conversation = Conversation::new();
        assert!(conversation.system_prompt().is_none());
    }
}
