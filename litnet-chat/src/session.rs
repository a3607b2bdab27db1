//! Chat session state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use litnet_core::models::{ChatMessage, ChatTurn};
use litnet_network::Selection;
use litnet_retrieval::{GraphRetriever, VectorIndex};

/// One conversation bound to one selection and its retrieval context.
///
/// The index and retriever hold owned data copied out of the selection,
/// so snapshot rebuilds elsewhere never invalidate a live session.
pub struct ChatSession {
    pub id: String,
    pub selection: Selection,
    pub index: VectorIndex,
    pub retriever: GraphRetriever,
    pub history: Vec<ChatMessage>,
    pub turns: Vec<ChatTurn>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(selection: Selection, index: VectorIndex) -> Self {
        let retriever = GraphRetriever::new(&selection);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            selection,
            index,
            retriever,
            history: Vec::new(),
            turns: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// The most recent messages, bounded to `max_turns` exchanges.
    pub fn recent_history(&self, max_turns: usize) -> &[ChatMessage] {
        let max_messages = max_turns.saturating_mul(2);
        let start = self.history.len().saturating_sub(max_messages);
        &self.history[start..]
    }

    /// Append a completed exchange. Called only after generation
    /// succeeded; failed calls leave history untouched.
    pub fn record_turn(&mut self, turn: ChatTurn) {
        self.history.push(ChatMessage::user(turn.query.clone()));
        self.history.push(ChatMessage::assistant(
            turn.answer.clone(),
            turn.cited_pmids.clone(),
        ));
        self.turns.push(turn);
        self.last_activity = Utc::now();
    }
}
