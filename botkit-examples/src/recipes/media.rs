//! Media groups. `/album` sends three photos as one album. Incoming albums arrive as one message
//! per item sharing a `media_group_id`; the first item is acknowledged and the rest counted silently.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{validate_media_group, Bot, Handler, HandlerResponse, MediaItem, Message, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::reply::reply;

pub fn demo_album() -> Vec<MediaItem> {
    vec![
        MediaItem::photo("https://picsum.photos/id/10/800/600").with_caption("A little album"),
        MediaItem::photo("https://picsum.photos/id/20/800/600"),
        MediaItem::photo("https://picsum.photos/id/30/800/600"),
    ]
}

pub struct AlbumCommandHandler {
    bot: Arc<dyn Bot>,
    items: Vec<MediaItem>,
}

impl AlbumCommandHandler {
    pub fn new(bot: Arc<dyn Bot>, items: Vec<MediaItem>) -> Self {
        Self { bot, items }
    }
}

#[async_trait]
impl Handler for AlbumCommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        validate_media_group(&self.items)?;
        self.bot.send_media_group(&message.chat, &self.items).await?;
        info!(chat_id = message.chat.id, items = self.items.len(), "Sent album");
        Ok(HandlerResponse::Stop)
    }
}

/// Album parts arrive within a few seconds of each other; a group quiet for this long is forgotten.
pub const ALBUM_WINDOW: Duration = Duration::from_secs(60);

struct AlbumParts {
    count: usize,
    last_seen: Instant,
}

/// Tracks how many parts of each incoming album have been seen.
pub struct AlbumReceiver {
    bot: Arc<dyn Bot>,
    window: Duration,
    parts: Mutex<HashMap<String, AlbumParts>>,
}

impl AlbumReceiver {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self::with_window(bot, ALBUM_WINDOW)
    }

    pub fn with_window(bot: Arc<dyn Bot>, window: Duration) -> Self {
        Self {
            bot,
            window,
            parts: Mutex::new(HashMap::new()),
        }
    }

    /// Parts seen so far for `media_group_id`.
    pub async fn parts(&self, media_group_id: &str) -> usize {
        self.parts
            .lock()
            .await
            .get(media_group_id)
            .map_or(0, |p| p.count)
    }

    /// Albums currently tracked.
    pub async fn tracked(&self) -> usize {
        self.parts.lock().await.len()
    }
}

#[async_trait]
impl Handler for AlbumReceiver {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(group_id) = message.media_group_id.as_deref() else {
            return Ok(HandlerResponse::Ignore);
        };

        let seen = {
            let mut parts = self.parts.lock().await;
            let now = Instant::now();
            let window = self.window;
            parts.retain(|_, p| now.duration_since(p.last_seen) <= window);
            let entry = parts.entry(group_id.to_string()).or_insert(AlbumParts {
                count: 0,
                last_seen: now,
            });
            entry.count += 1;
            entry.last_seen = now;
            entry.count
        };
        debug!(media_group_id = %group_id, part = seen, "Album part received");

        if seen == 1 {
            reply(self.bot.as_ref(), message, "Got your album! 🖼").await
        } else {
            Ok(HandlerResponse::Stop)
        }
    }
}

pub fn chain(bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(on_command(
            "album",
            Arc::new(AlbumCommandHandler::new(bot.clone(), demo_album())),
        ))
        .add_handler(Arc::new(AlbumReceiver::new(bot)))
}
