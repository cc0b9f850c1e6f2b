//! Common types used throughout the relay.

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation.
///
/// Maps to the chat completions API message roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt or instructions
    System,
    /// Message from the human user
    User,
    /// Message from the AI assistant
    Assistant,
}
