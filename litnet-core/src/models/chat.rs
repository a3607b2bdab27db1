//! Chat conversation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GraphEvidence, Pmid, TextEvidence};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name used by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Cited PMIDs, populated on assistant messages only.
    #[serde(default)]
    pub sources: Vec<Pmid>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content, Vec::new())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, Vec::new())
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<Pmid>) -> Self {
        Self::new(Role::Assistant, content, sources)
    }

    fn new(role: Role, content: impl Into<String>, sources: Vec<Pmid>) -> Self {
        Self {
            role,
            content: content.into(),
            sources,
            timestamp: Utc::now(),
        }
    }
}

/// One completed question/answer exchange with its retrieval provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub query: String,
    pub answer: String,
    /// Exactly the PMIDs the answer text cites (a subset of what was retrieved).
    pub cited_pmids: Vec<Pmid>,
    pub text_evidence: Vec<TextEvidence>,
    pub graph_evidence: Vec<GraphEvidence>,
}

/// Result of `ask`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AskOutcome {
    Answered(ChatTurn),
    /// Retrieval produced no evidence; the generation service was not called.
    Abstained { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_message_carries_sources() {
        let msg = ChatMessage::assistant("answer", vec!["100".into()]);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.sources, vec!["100".to_string()]);
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
