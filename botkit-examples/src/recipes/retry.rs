//! Retry: `/fetch` sends its reply through a fixed-count, fixed-delay retry that only repeats
//! network-class failures.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{retry, Bot, Handler, HandlerResponse, Message, Result, RetryPolicy};
use tracing::info;

pub const FETCH_REPLY: &str = "Here is your data: 🍪";

pub struct FetchHandler {
    bot: Arc<dyn Bot>,
    policy: RetryPolicy,
}

impl FetchHandler {
    pub fn new(bot: Arc<dyn Bot>, policy: RetryPolicy) -> Self {
        Self { bot, policy }
    }
}

#[async_trait]
impl Handler for FetchHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let attempts = AtomicU32::new(0);
        let attempts_ref = &attempts;
        let bot = self.bot.as_ref();

        retry(&self.policy, "fetch_reply", move || async move {
            attempts_ref.fetch_add(1, Ordering::SeqCst);
            bot.reply_to(message, FETCH_REPLY).await
        })
        .await?;

        info!(
            chat_id = message.chat.id,
            attempts = attempts.load(Ordering::SeqCst),
            "Fetch reply delivered"
        );
        Ok(HandlerResponse::Reply(FETCH_REPLY.to_string()))
    }
}

pub fn chain(bot: Arc<dyn Bot>, policy: RetryPolicy) -> HandlerChain {
    HandlerChain::new().add_handler(on_command("fetch", Arc::new(FetchHandler::new(bot, policy))))
}
