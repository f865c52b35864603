//! Middleware for logging and allow-list auth.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use botkit_core::{Bot, HandlerError, HandlerResponse, Message, Middleware, Result};
use tracing::{debug, info, instrument, warn};

pub const ACCESS_DENIED: &str = "Access denied.";

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = ?message.kind,
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// What an unknown user gets.
enum Rejection {
    /// Reply with a message, then halt the chain.
    Reply { bot: Arc<dyn Bot>, text: String },
    /// Halt silently.
    Silent,
    /// Fail the chain with `HandlerError::Unauthorized`.
    Error,
}

/// Lets through only users on a static allow-list.
pub struct AuthMiddleware {
    allowed_users: HashSet<i64>,
    rejection: Rejection,
}

impl AuthMiddleware {
    /// Halts the chain silently for users not in `allowed_users`.
    pub fn new(allowed_users: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed_users: allowed_users.into_iter().collect(),
            rejection: Rejection::Silent,
        }
    }

    /// Replies [`ACCESS_DENIED`] to unknown users before halting.
    pub fn with_reply(allowed_users: impl IntoIterator<Item = i64>, bot: Arc<dyn Bot>) -> Self {
        Self {
            allowed_users: allowed_users.into_iter().collect(),
            rejection: Rejection::Reply {
                bot,
                text: ACCESS_DENIED.to_string(),
            },
        }
    }

    /// Fails the chain with `HandlerError::Unauthorized` for unknown users.
    pub fn strict(allowed_users: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed_users: allowed_users.into_iter().collect(),
            rejection: Rejection::Error,
        }
    }

    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.allowed_users.contains(&user_id)
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user_id = message.user.id;
        if self.is_allowed(user_id) {
            debug!(user_id = user_id, "User authorized");
            return Ok(true);
        }

        warn!(user_id = user_id, chat_id = message.chat.id, "Unauthorized access attempt");
        match &self.rejection {
            Rejection::Reply { bot, text } => {
                bot.reply_to(message, text).await?;
                Ok(false)
            }
            Rejection::Silent => Ok(false),
            Rejection::Error => Err(HandlerError::Unauthorized.into()),
        }
    }
}

/// Logs how long each message took from first middleware to last after hook.
/// Register it first so the measurement covers everything else.
#[derive(Default)]
pub struct ResponseTimeMiddleware {
    started: tokio::sync::Mutex<std::collections::HashMap<String, std::time::Instant>>,
}

impl ResponseTimeMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages currently being timed.
    pub async fn in_flight(&self) -> usize {
        self.started.lock().await.len()
    }

    fn key(message: &Message) -> String {
        format!("{}:{}", message.chat.id, message.id)
    }
}

#[async_trait]
impl Middleware for ResponseTimeMiddleware {
    async fn before(&self, message: &Message) -> Result<bool> {
        self.started
            .lock()
            .await
            .insert(Self::key(message), std::time::Instant::now());
        Ok(true)
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if let Some(start) = self.started.lock().await.remove(&Self::key(message)) {
            info!(
                chat_id = message.chat.id,
                message_id = %message.id,
                elapsed_ms = start.elapsed().as_millis() as u64,
                response = ?response,
                "Response time"
            );
        }
        Ok(())
    }
}
