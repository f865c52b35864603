//! Allow-list: only users listed in ALLOWED_USERS get past the auth middleware; others are told
//! `Access denied.` and the chain stops.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_chain::{on_command, HandlerChain};
use botkit_core::{Bot, Handler, HandlerResponse, Message, Result};
use botkit_middleware::{AuthMiddleware, LoggingMiddleware};

use crate::reply::reply;

pub struct WhoAmIHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for WhoAmIHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = format!(
            "You are {} (id {}), chat {}.",
            message.user.display_name(),
            message.user.id,
            message.chat.id
        );
        reply(self.bot.as_ref(), message, text).await
    }
}

/// Anything else an authorized user sends.
pub struct WelcomeHandler {
    bot: Arc<dyn Bot>,
}

#[async_trait]
impl Handler for WelcomeHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        reply(self.bot.as_ref(), message, "Welcome, you are on the list.").await
    }
}

pub fn chain(bot: Arc<dyn Bot>, allowed_users: &[i64]) -> HandlerChain {
    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(AuthMiddleware::with_reply(
            allowed_users.iter().copied(),
            bot.clone(),
        )))
        .add_handler(on_command("whoami", Arc::new(WhoAmIHandler { bot: bot.clone() })))
        .add_handler(Arc::new(WelcomeHandler { bot }))
}
