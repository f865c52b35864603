//! Middleware composition: logging and response timing wrap every message, `/ping` answers and
//! stops the chain, anything else falls through to the echo handler.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{Bot, Handler, HandlerResponse, Message, Result};
use botkit_middleware::{LoggingMiddleware, ResponseTimeMiddleware};

use crate::recipes::echo::EchoHandler;
use crate::reply::reply;

pub struct PingHandler {
    bot: Arc<dyn Bot>,
}

impl PingHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        reply(self.bot.as_ref(), message, "pong").await
    }
}

pub fn chain(bot: Arc<dyn Bot>) -> HandlerChain {
    HandlerChain::new()
        .add_middleware(Arc::new(ResponseTimeMiddleware::new()))
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_handler(on_command("ping", Arc::new(PingHandler::new(bot.clone()))))
        .add_handler(Arc::new(EchoHandler::new(bot)))
}
