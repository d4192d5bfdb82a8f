use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// One entry in the simulated conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            created_at,
        }
    }

    pub fn user(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(Sender::User, text, created_at)
    }

    pub fn bot(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(Sender::Bot, text, created_at)
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }

    #[test]
    fn test_message_constructors() {
        let now = Utc::now();
        let user = ChatMessage::user("hi", now);
        let bot = ChatMessage::bot("hello", now);

        assert!(user.is_user());
        assert!(!bot.is_user());
        assert_eq!(user.text, "hi");
        assert_eq!(bot.created_at, now);
        assert_ne!(user.id, bot.id);
    }

    #[test]
    fn test_sender_serializes_snake_case() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }
}
