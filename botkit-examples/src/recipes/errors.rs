//! Error boundaries. `/boom` fails inside a resuming boundary: the user gets an apology and the
//! chain goes on. `/halt` fails inside a halting boundary: apology, then the chain stops. `/ok` works.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::filter;
use botkit_chain::{on_command, ErrorBoundary, ErrorPolicy, Filtered, HandlerChain};
use botkit_core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::info;

use crate::reply::reply;

pub const CHAIN_CONTINUED: &str = "The chain kept going after the error.";

/// Always fails.
pub struct FailingHandler;

#[async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        Err(HandlerError::Failed(format!("simulated failure for message {}", message.id)).into())
    }
}

pub struct OkHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for OkHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        reply(self.bot.as_ref(), message, "All good.").await
    }
}

/// Runs after the boundaries; only reachable when a boundary resumed.
pub struct TailHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for TailHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(chat_id = message.chat.id, "Reached end of chain");
        reply(self.bot.as_ref(), message, CHAIN_CONTINUED).await
    }
}

pub fn chain(bot: Arc<dyn Bot>) -> HandlerChain {
    let resumable = HandlerChain::new().add_handler(on_command("boom", Arc::new(FailingHandler)));
    let halting = HandlerChain::new().add_handler(on_command("halt", Arc::new(FailingHandler)));

    HandlerChain::new()
        .add_handler(Arc::new(ErrorBoundary::new(
            resumable,
            bot.clone(),
            ErrorPolicy::Resume,
        )))
        .add_handler(Arc::new(ErrorBoundary::new(
            halting,
            bot.clone(),
            ErrorPolicy::Halt,
        )))
        .add_handler(on_command("ok", Arc::new(OkHandler { bot: bot.clone() })))
        .add_handler(Arc::new(Filtered::new(
            filter::or(filter::is_command("boom"), filter::is_command("halt")),
            Arc::new(TailHandler { bot }),
        )))
}
