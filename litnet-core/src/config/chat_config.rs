use serde::{Deserialize, Serialize};

use super::defaults;

/// Chat / retrieval-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Conversation turns kept and sent to the generation service.
    pub max_history_turns: usize,
    /// Vector hits retrieved per question.
    pub top_k: usize,
    /// Cap on evidence items packed into the prompt context.
    pub max_context_items: usize,
    /// Cap on total context characters.
    pub max_context_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history_turns: defaults::DEFAULT_MAX_HISTORY_TURNS,
            top_k: defaults::DEFAULT_TOP_K,
            max_context_items: defaults::DEFAULT_MAX_CONTEXT_ITEMS,
            max_context_chars: defaults::DEFAULT_MAX_CONTEXT_CHARS,
        }
    }
}
