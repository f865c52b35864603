//! Filters: scope a handler to messages matching a predicate.
//!
//! A non-matching message makes the wrapped handler answer `Ignore`; its `before` / `after` hooks are skipped.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use botkit_core::{ContentKind, Handler, HandlerResponse, Message, Result};
use regex::Regex;

/// Shared message predicate.
pub type Predicate = Arc<dyn Fn(&Message) -> bool + Send + Sync>;

/// Runs `inner` only for messages accepted by `predicate`.
pub struct Filtered {
    predicate: Predicate,
    inner: Arc<dyn Handler>,
}

impl Filtered {
    pub fn new(predicate: Predicate, inner: Arc<dyn Handler>) -> Self {
        Self { predicate, inner }
    }

    fn matches(&self, message: &Message) -> bool {
        (self.predicate)(message)
    }
}

#[async_trait]
impl Handler for Filtered {
    async fn before(&self, message: &Message) -> Result<bool> {
        if self.matches(message) {
            self.inner.before(message).await
        } else {
            Ok(true)
        }
    }

    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if self.matches(message) {
            self.inner.handle(message).await
        } else {
            Ok(HandlerResponse::Ignore)
        }
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if self.matches(message) {
            self.inner.after(message, response).await
        } else {
            Ok(())
        }
    }
}

/// `inner` runs only for `/name` (case-insensitive, any `@bot` suffix).
pub fn on_command(name: &str, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
    Arc::new(Filtered::new(is_command(name), inner))
}

/// `inner` runs only for text matching `pattern`.
pub fn hears(pattern: Regex, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
    Arc::new(Filtered::new(text_matches(pattern), inner))
}

pub fn is_text() -> Predicate {
    Arc::new(|m: &Message| m.kind == ContentKind::Text)
}

pub fn is_photo() -> Predicate {
    Arc::new(|m: &Message| m.kind == ContentKind::Photo)
}

pub fn is_sticker() -> Predicate {
    Arc::new(|m: &Message| m.kind == ContentKind::Sticker)
}

/// Photo, video, document or voice.
pub fn has_media() -> Predicate {
    Arc::new(|m: &Message| m.kind.is_media())
}

/// Part of an album.
pub fn in_media_group() -> Predicate {
    Arc::new(|m: &Message| m.media_group_id.is_some())
}

pub fn is_private() -> Predicate {
    Arc::new(|m: &Message| m.chat.is_private())
}

/// Group or supergroup.
pub fn is_group() -> Predicate {
    Arc::new(|m: &Message| m.chat.is_group())
}

pub fn is_command(name: &str) -> Predicate {
    let name = name.trim_start_matches('/').to_lowercase();
    Arc::new(move |m: &Message| m.command(None).is_some_and(|c| c.name == name))
}

/// Any command at all.
pub fn is_any_command() -> Predicate {
    Arc::new(|m: &Message| m.command(None).is_some())
}

pub fn text_matches(pattern: Regex) -> Predicate {
    Arc::new(move |m: &Message| m.kind == ContentKind::Text && pattern.is_match(&m.content))
}

pub fn from_users(ids: impl IntoIterator<Item = i64>) -> Predicate {
    let ids: HashSet<i64> = ids.into_iter().collect();
    Arc::new(move |m: &Message| ids.contains(&m.user.id))
}

pub fn and(a: Predicate, b: Predicate) -> Predicate {
    Arc::new(move |m: &Message| a(m) && b(m))
}

pub fn or(a: Predicate, b: Predicate) -> Predicate {
    Arc::new(move |m: &Message| a(m) || b(m))
}

pub fn not(p: Predicate) -> Predicate {
    Arc::new(move |m: &Message| !p(m))
}
