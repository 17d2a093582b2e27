//! In-memory chat history for one visit to the home view.

use std::sync::Arc;

use uuid::Uuid;

use counselor_core::types::{ConversationTurn, Role};

use crate::engine::DialogueEngine;
use crate::error::ChatError;

/// Append-only list of turns. Lost when the session is dropped.
#[derive(Debug)]
pub struct ChatSession {
    pub id: Uuid,
    engine: Arc<DialogueEngine>,
    turns: Vec<ConversationTurn>,
    max_message_chars: usize,
}

impl ChatSession {
    /// Start a session seeded with the assistant's greeting.
    pub fn new(engine: Arc<DialogueEngine>, greeting: &str, max_message_chars: usize) -> Self {
        let mut turns = Vec::new();
        if !greeting.trim().is_empty() {
            turns.push(ConversationTurn::new(Role::Assistant, greeting));
        }
        Self {
            id: Uuid::new_v4(),
            engine,
            turns,
            max_message_chars,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Ask a question: append the user turn, the reply, and return the reply.
    pub fn ask(&mut self, text: &str) -> Result<&ConversationTurn, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.max_message_chars {
            return Err(ChatError::MessageTooLong(self.max_message_chars));
        }

        self.turns.push(ConversationTurn::new(Role::User, text));
        let reply = self.engine.respond(text);
        self.turns.push(ConversationTurn::new(Role::Assistant, reply));
        tracing::debug!(session = %self.id, turns = self.turns.len(), "Chat turn appended");

        Ok(&self.turns[self.turns.len() - 1])
    }
}
