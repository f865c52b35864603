//! Context filtering: different replies for greetings, text, photos, stickers and other media,
//! and a command that only works in private chats.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::filter::{self, Predicate};
use botkit_chain::{hears, on_command, Filtered, HandlerChain};
use botkit_core::{Bot, ContentKind, Handler, HandlerResponse, Message, Result};
use regex::Regex;

use crate::reply::reply;

pub const SECRET: &str = "The secret is 42.";
pub const PRIVATE_ONLY: &str = "This command only works in a private chat.";

/// Replies with a fixed text.
pub struct StaticReply {
    bot: Arc<dyn Bot>,
    text: String,
}

impl StaticReply {
    pub fn new(bot: Arc<dyn Bot>, text: impl Into<String>) -> Self {
        Self {
            bot,
            text: text.into(),
        }
    }
}

#[async_trait]
impl Handler for StaticReply {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        reply(self.bot.as_ref(), message, self.text.clone()).await
    }
}

/// Greets the sender by name.
pub struct GreetingHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for GreetingHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = format!("Hi {}! 👋", message.user.display_name());
        reply(self.bot.as_ref(), message, text).await
    }
}

/// Describes the text it was sent.
pub struct TextHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for TextHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let words = message.content.split_whitespace().count();
        let text = format!("You sent text with {} word(s).", words);
        reply(self.bot.as_ref(), message, text).await
    }
}

/// Acknowledges any single media message not handled earlier. Album parts get no reply.
pub struct MediaHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for MediaHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let what = match message.kind {
            ContentKind::Video => "video",
            ContentKind::Document => "document",
            ContentKind::Voice => "voice message",
            ContentKind::Photo => "photo",
            _ => return Ok(HandlerResponse::Ignore),
        };
        let text = match &message.caption {
            Some(caption) => format!("Got your {} with caption \"{}\".", what, caption),
            None => format!("Got your {}.", what),
        };
        reply(self.bot.as_ref(), message, text).await
    }
}

pub fn greeting_pattern() -> Regex {
    Regex::new(r"(?i)^\s*(hello|hi|hey)\b").expect("greeting pattern is valid")
}

fn plain_text() -> Predicate {
    filter::and(filter::is_text(), filter::not(filter::is_any_command()))
}

pub fn chain(bot: Arc<dyn Bot>) -> HandlerChain {
    let secret_private = Filtered::new(
        filter::is_private(),
        Arc::new(StaticReply::new(bot.clone(), SECRET)),
    );
    let secret_elsewhere = Filtered::new(
        filter::not(filter::is_private()),
        Arc::new(StaticReply::new(bot.clone(), PRIVATE_ONLY)),
    );

    HandlerChain::new()
        .add_handler(hears(
            greeting_pattern(),
            Arc::new(GreetingHandler { bot: bot.clone() }),
        ))
        .add_handler(on_command("secret", Arc::new(secret_private)))
        .add_handler(on_command("secret", Arc::new(secret_elsewhere)))
        .add_handler(Arc::new(Filtered::new(
            plain_text(),
            Arc::new(TextHandler { bot: bot.clone() }),
        )))
        .add_handler(Arc::new(Filtered::new(
            filter::and(filter::is_photo(), filter::not(filter::in_media_group())),
            Arc::new(StaticReply::new(bot.clone(), "Nice photo! 📷")),
        )))
        .add_handler(Arc::new(Filtered::new(
            filter::is_sticker(),
            Arc::new(StaticReply::new(bot.clone(), "Cool sticker!")),
        )))
        .add_handler(Arc::new(Filtered::new(
            filter::and(filter::has_media(), filter::not(filter::in_media_group())),
            Arc::new(MediaHandler { bot }),
        )))
}
