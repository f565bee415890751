//! Remote model transport.
//!
//! The generator depends on a single "send chat request" capability, not on
//! a vendor client; the concrete Groq backend lives in `groq`.

pub mod groq;

use crate::history::{Role, Turn};
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// One message in a chat-style request, in wire order.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: turn.content.clone(),
        }
    }
}

/// The one capability the generator needs from a remote model.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send an ordered message list and return the raw completion text.
    async fn send(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_conversion() {
        let msg = ChatMessage::from(&Turn::user("list files"));
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "list files");

        let msg = ChatMessage::from(&Turn::assistant("ls"));
        assert_eq!(msg.role, "assistant");
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_string(&ChatMessage::system("be brief")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"be brief"}"#);
    }
}
