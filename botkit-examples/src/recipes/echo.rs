//! Echo: repeats every text message back as `Echo: <text>`.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::HandlerChain;
use botkit_core::{Bot, ContentKind, Handler, HandlerResponse, Message, Result};
use tracing::instrument;

use crate::reply::reply;

pub struct EchoHandler {
    bot: Arc<dyn Bot>,
}

impl EchoHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for EchoHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != ContentKind::Text || message.content.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }
        reply(self.bot.as_ref(), message, format!("Echo: {}", message.content)).await
    }
}

pub fn chain(bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new().add_handler(Arc::new(EchoHandler::new(bot)))
}
