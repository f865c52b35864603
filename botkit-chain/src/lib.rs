//! # Handler chain
//!
//! Runs middleware and handlers for each message:
//!
//! 1. middleware `before` in order; `false` halts the chain with `Stop`;
//! 2. handler `before` in order; `false` halts the chain with `Stop`;
//! 3. handler `handle` in order until one returns `Stop` or `Reply`;
//! 4. handler `after` in reverse, then `after` of every middleware whose `before` ran, in reverse.
//!    When a handler fails, those middleware still get `after(Stop)` before the error is returned.
//!
//! [`Filtered`] scopes a handler to matching messages and [`ErrorBoundary`] contains failures of a sub-chain.

mod boundary;
pub mod filter;

pub use boundary::{ErrorBoundary, ErrorPolicy, DEFAULT_APOLOGY};
pub use filter::{hears, on_command, Filtered, Predicate};

use botkit_core::{Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Chain of middleware and handlers. Cheap to clone; built once at startup.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware (before runs ahead of handlers, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handle phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        let mut entered = 0;
        let mut halted = false;
        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            debug!(user_id = message.user.id, middleware = %mw_name, "step: middleware before");
            if !mw.before(message).await? {
                info!(
                    user_id = message.user.id,
                    middleware = %mw_name,
                    "step: middleware before returned false, chain stopped"
                );
                halted = true;
                break;
            }
            entered += 1;
        }

        let final_response = if halted {
            HandlerResponse::Stop
        } else {
            match self.run_handlers(message).await {
                Ok(response) => response,
                Err(e) => {
                    // Entered middleware still get after(Stop) so per-message state is released.
                    for mw in self.middleware[..entered].iter().rev() {
                        if let Err(after_err) = mw.after(message, &HandlerResponse::Stop).await {
                            warn!(
                                user_id = message.user.id,
                                error = %after_err,
                                "step: middleware after failed while unwinding"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        };

        for mw in self.middleware[..entered].iter().rev() {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            debug!(user_id = message.user.id, middleware = %mw_name, "step: middleware after");
            mw.after(message, &final_response).await?;
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            response = ?final_response,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }

    async fn run_handlers(&self, message: &Message) -> Result<HandlerResponse> {
        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            if !h.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = %name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            let (response_type, reply_len) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Ignore => ("Ignore", None),
                HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
            };
            debug!(
                user_id = message.user.id,
                handler = %name,
                response_type = %response_type,
                reply_len = ?reply_len,
                "step: handler done"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        user_id = message.user.id,
                        handler = %name,
                        "step: handler chain stopped by handler"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        Ok(final_response)
    }
}

// Integration tests live in tests/handler_chain_test.rs
