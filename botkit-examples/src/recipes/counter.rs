//! Per-chat message counter kept in a process-local map. Every message is counted, `/count` reports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{Bot, Handler, HandlerResponse, Message, Middleware, Result};
use tokio::sync::Mutex;

use crate::reply::reply;

#[derive(Default)]
pub struct MessageCounter {
    counts: Mutex<HashMap<i64, u64>>,
}

impl MessageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, chat_id: i64) -> u64 {
        self.counts.lock().await.get(&chat_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Middleware for MessageCounter {
    async fn before(&self, message: &Message) -> Result<bool> {
        *self.counts.lock().await.entry(message.chat.id).or_insert(0) += 1;
        Ok(true)
    }
}

pub struct CountHandler {
    bot: Arc<dyn Bot>,
    counter: Arc<MessageCounter>,
}

#[async_trait]
impl Handler for CountHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let count = self.counter.count(message.chat.id).await;
        let text = format!("This chat has sent {} message(s) so far.", count);
        reply(self.bot.as_ref(), message, text).await
    }
}

pub fn chain(bot: Arc<dyn Bot>, counter: Arc<MessageCounter>) -> HandlerChain {
    HandlerChain::new()
        .add_middleware(counter.clone())
        .add_handler(on_command("count", Arc::new(CountHandler { bot, counter })))
}
