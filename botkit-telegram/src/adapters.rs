//! Adapters from Telegram (teloxide) types to botkit_core types.
//! Depends only on teloxide and botkit_core type definitions.

use botkit_core::{
    Chat, ChatKind, ContentKind, InlineQuery, Message, ToCoreInlineQuery, ToCoreMessage,
    ToCoreUser, User,
};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            is_bot: self.0.is_bot,
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: Chat {
                id: msg.chat.id.0,
                kind: self.chat_kind(),
            },
            content: msg.text().unwrap_or("").to_string(),
            kind: self.content_kind(),
            caption: msg.caption().map(|s| s.to_string()),
            file_id: self.file_id(),
            media_group_id: msg.media_group_id().map(|id| id.to_string()),
            created_at: msg.date,
            reply_to_message_id: msg.reply_to_message().map(|m| m.id.to_string()),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn chat_kind(&self) -> ChatKind {
        let chat = &self.0.chat;
        if chat.is_private() {
            ChatKind::Private
        } else if chat.is_supergroup() {
            ChatKind::Supergroup
        } else if chat.is_channel() {
            ChatKind::Channel
        } else {
            ChatKind::Group
        }
    }

    fn content_kind(&self) -> ContentKind {
        let msg = self.0;
        if msg.text().is_some() {
            ContentKind::Text
        } else if msg.photo().is_some() {
            ContentKind::Photo
        } else if msg.video().is_some() {
            ContentKind::Video
        } else if msg.document().is_some() {
            ContentKind::Document
        } else if msg.sticker().is_some() {
            ContentKind::Sticker
        } else if msg.voice().is_some() {
            ContentKind::Voice
        } else {
            ContentKind::Other
        }
    }

    /// Largest photo size, or the attached video / document / sticker / voice.
    fn file_id(&self) -> Option<String> {
        let msg = self.0;
        if let Some(sizes) = msg.photo() {
            return sizes.last().map(|p| p.file.id.to_string());
        }
        msg.video()
            .map(|v| v.file.id.to_string())
            .or_else(|| msg.document().map(|d| d.file.id.to_string()))
            .or_else(|| msg.sticker().map(|s| s.file.id.to_string()))
            .or_else(|| msg.voice().map(|v| v.file.id.to_string()))
    }
}

/// Channel posts have no sender; they are attributed to user id 0.
fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
        is_bot: false,
    }
}

/// Wraps a teloxide InlineQuery for conversion to core [`InlineQuery`].
pub struct TelegramInlineQueryWrapper<'a>(pub &'a teloxide::types::InlineQuery);

impl<'a> ToCoreInlineQuery for TelegramInlineQueryWrapper<'a> {
    fn to_core(&self) -> InlineQuery {
        InlineQuery {
            from: TelegramUserWrapper(&self.0.from).to_core(),
            query: self.0.query.clone(),
            offset: self.0.offset.clone(),
        }
    }
}
