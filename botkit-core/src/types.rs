//! Core types: user, chat, message, inline query, handler response, and the Handler / Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::{parse_command, Command};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// First name, else @username, else the numeric id.
    pub fn display_name(&self) -> String {
        if let Some(first) = self.first_name.as_deref().filter(|s| !s.is_empty()) {
            return first.to_string();
        }
        match &self.username {
            Some(username) => format!("@{}", username),
            None => self.id.to_string(),
        }
    }
}

/// Kind of chat the message arrived in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }

    /// Group or supergroup.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// What the message carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Photo,
    Video,
    Document,
    Sticker,
    Voice,
    Other,
}

impl ContentKind {
    pub fn is_media(self) -> bool {
        matches!(
            self,
            ContentKind::Photo | ContentKind::Video | ContentKind::Document | ContentKind::Voice
        )
    }
}

/// A single inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for media messages (see `caption`).
    pub content: String,
    pub kind: ContentKind,
    pub caption: Option<String>,
    /// Transport file id of the attached media (largest size for photos).
    pub file_id: Option<String>,
    /// Shared by all parts of one album.
    pub media_group_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
}

impl Message {
    /// Parses a leading `/command` from the text. `bot_username` filters commands addressed to other bots.
    pub fn command(&self, bot_username: Option<&str>) -> Option<Command> {
        if self.kind != ContentKind::Text {
            return None;
        }
        parse_command(&self.content, bot_username)
    }
}

/// An inline query typed in any chat as `@bot query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineQuery {
    pub from: User,
    pub query: String,
    pub offset: String,
}

/// Text article offered as an inline query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineArticle {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Text sent to the chat when the result is picked.
    pub text: String,
}

impl InlineArticle {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            text: text.into(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One photo of an album sent with `Bot::send_media_group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub caption: Option<String>,
}

impl MediaItem {
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later hooks can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific inline query to core [`InlineQuery`].
pub trait ToCoreInlineQuery: Send + Sync {
    fn to_core(&self) -> InlineQuery;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Wraps every message: `before` runs ahead of all handlers (false halts), `after` runs once the handlers are done.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, message: &Message) -> crate::error::Result<bool>;

    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Produces the results for an inline query.
#[async_trait]
pub trait InlineQueryHandler: Send + Sync {
    async fn answer(&self, query: &InlineQuery) -> crate::error::Result<Vec<InlineArticle>>;
}
