//! Wraps teloxide::Bot and implements [`botkit_core::Bot`]. Production code sends via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use botkit_core::bot::parse_message_id;
use botkit_core::{validate_media_group, Bot as CoreBot, BotkitError, Chat, MediaItem, Message, Result};
use teloxide::types::{ChatId, InputFile, InputMedia, InputMediaPhoto, MessageId};
use teloxide::{prelude::*, RequestError};

/// Thin wrapper around teloxide::Bot that implements botkit-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Network and I/O failures are transient; everything the API itself reports is not.
pub fn map_request_error(e: RequestError) -> BotkitError {
    match &e {
        RequestError::Network(_) | RequestError::Io(_) => BotkitError::Network(e.to_string()),
        RequestError::RetryAfter(_) => BotkitError::RateLimited(e.to_string()),
        _ => BotkitError::Api(e.to_string()),
    }
}

fn to_input_media(item: &MediaItem) -> Result<InputMedia> {
    let url = reqwest::Url::parse(&item.url)
        .map_err(|e| BotkitError::Api(format!("Invalid media url {}: {}", item.url, e)))?;
    let mut photo = InputMediaPhoto::new(InputFile::url(url));
    if let Some(caption) = &item.caption {
        photo = photo.caption(caption.clone());
    }
    Ok(InputMedia::Photo(photo))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(map_request_error)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(map_request_error)?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(map_request_error)?;
        Ok(sent.id.to_string())
    }

    async fn send_media_group(&self, chat: &Chat, items: &[MediaItem]) -> Result<()> {
        validate_media_group(items)?;
        let media = items.iter().map(to_input_media).collect::<Result<Vec<_>>>()?;
        self.bot
            .send_media_group(ChatId(chat.id), media)
            .await
            .map_err(map_request_error)?;
        Ok(())
    }
}
