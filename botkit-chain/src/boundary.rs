//! Error boundary: runs a sub-chain and contains its failures.

use std::sync::Arc;

use async_trait::async_trait;
use botkit_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{error, warn};

use crate::HandlerChain;

pub const DEFAULT_APOLOGY: &str = "Sorry, something went wrong. Please try again later.";

/// What the outer chain does after a contained failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Answer `Continue`; later handlers still run.
    Resume,
    /// Answer `Stop`; the outer chain ends here.
    Halt,
}

/// Runs `inner`; on error logs it, sends an apology and answers according to `policy`.
/// Errors never escape the boundary, including a failed apology send.
pub struct ErrorBoundary {
    inner: HandlerChain,
    bot: Arc<dyn Bot>,
    policy: ErrorPolicy,
    apology: String,
}

impl ErrorBoundary {
    pub fn new(inner: HandlerChain, bot: Arc<dyn Bot>, policy: ErrorPolicy) -> Self {
        Self {
            inner,
            bot,
            policy,
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }

    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = apology.into();
        self
    }
}

#[async_trait]
impl Handler for ErrorBoundary {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match self.inner.handle(message).await {
            Ok(response) => Ok(response),
            Err(e) => {
                error!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    error = %e,
                    policy = ?self.policy,
                    "Error caught by boundary"
                );
                if let Err(send_err) = self.bot.reply_to(message, &self.apology).await {
                    warn!(chat_id = message.chat.id, error = %send_err, "Failed to send apology");
                }
                Ok(match self.policy {
                    ErrorPolicy::Resume => HandlerResponse::Continue,
                    ErrorPolicy::Halt => HandlerResponse::Stop,
                })
            }
        }
    }
}
