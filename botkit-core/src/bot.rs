//! Bot abstraction for sending replies, edits and albums.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in `botkit-telegram`.

use crate::error::{HandlerError, Result};
use crate::types::{Chat, MediaItem, Message};
use async_trait::async_trait;

/// Telegram accepts between 2 and 10 items per album.
pub const MEDIA_GROUP_MIN: usize = 2;
pub const MEDIA_GROUP_MAX: usize = 10;

/// Abstraction for sending and editing messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Edits an already-sent message. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Sends a message and returns its id for later `edit_message`.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Sends several photos as one album. Callers should run [`validate_media_group`] first.
    async fn send_media_group(&self, chat: &Chat, items: &[MediaItem]) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| HandlerError::State(format!("Invalid message_id for edit: {}", s)).into())
}

/// Rejects albums Telegram would refuse, before any request is made.
pub fn validate_media_group(items: &[MediaItem]) -> Result<()> {
    if items.len() < MEDIA_GROUP_MIN || items.len() > MEDIA_GROUP_MAX {
        return Err(HandlerError::State(format!(
            "media group must have {}..={} items, got {}",
            MEDIA_GROUP_MIN,
            MEDIA_GROUP_MAX,
            items.len()
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(matches!(
            parse_message_id(""),
            Err(crate::error::BotkitError::Handler(HandlerError::State(_)))
        ));
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    #[test]
    fn test_validate_media_group_bounds() {
        let one = vec![MediaItem::photo("https://example.com/1.jpg")];
        assert!(validate_media_group(&one).is_err());

        let three: Vec<_> = (0..3)
            .map(|i| MediaItem::photo(format!("https://example.com/{}.jpg", i)))
            .collect();
        assert!(validate_media_group(&three).is_ok());

        let eleven: Vec<_> = (0..11)
            .map(|i| MediaItem::photo(format!("https://example.com/{}.jpg", i)))
            .collect();
        assert!(validate_media_group(&eleven).is_err());
    }
}
