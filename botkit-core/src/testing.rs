//! Test helpers: a recording [`Bot`] and message builders. Enabled with the `testing` feature.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::bot::Bot;
use crate::error::{BotkitError, Result};
use crate::types::{Chat, ChatKind, ContentKind, MediaItem, Message, User};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Edit { chat_id: i64, message_id: String, text: String },
    MediaGroup { chat_id: i64, items: Vec<MediaItem> },
}

/// Mock Bot that records every call. `failing_sends` makes the next N text sends fail with a network error.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    failing_sends: Mutex<u32>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The next `n` text sends fail with [`BotkitError::Network`].
    pub fn failing(n: u32) -> Arc<Self> {
        let bot = Self::default();
        *bot.failing_sends.lock().unwrap() = n;
        Arc::new(bot)
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of sent (not edited) messages, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    fn take_failure(&self) -> bool {
        let mut remaining = self.failing_sends.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.take_failure() {
            return Err(BotkitError::Network("mock connection reset".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.send_message(chat, text).await?;
        Ok("1".to_string())
    }

    async fn send_media_group(&self, chat: &Chat, items: &[MediaItem]) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::MediaGroup {
            chat_id: chat.id,
            items: items.to_vec(),
        });
        Ok(())
    }
}

pub fn test_user(id: i64) -> User {
    User {
        id,
        username: Some("test_user".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
        is_bot: false,
    }
}

/// Text message from user 123 in private chat 456.
pub fn text_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        user: test_user(123),
        chat: Chat {
            id: 456,
            kind: ChatKind::Private,
        },
        content: content.to_string(),
        kind: ContentKind::Text,
        caption: None,
        file_id: None,
        media_group_id: None,
        created_at: Utc::now(),
        reply_to_message_id: None,
    }
}

/// Media message (no text) of the given kind.
pub fn media_message(kind: ContentKind) -> Message {
    Message {
        content: String::new(),
        kind,
        file_id: Some("file-1".to_string()),
        ..text_message("")
    }
}

pub fn in_chat(mut message: Message, chat_id: i64, kind: ChatKind) -> Message {
    message.chat = Chat { id: chat_id, kind };
    message
}

pub fn from_user(mut message: Message, user_id: i64) -> Message {
    message.user = test_user(user_id);
    message
}
