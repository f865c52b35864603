//! # botkit-telegram
//!
//! Telegram layer: adapters, [`botkit_core::Bot`] implementation, env config, dispatcher.
//! Handles only Telegram connectivity and handing updates to the chain; no recipe logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramInlineQueryWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{map_request_error, TelegramBotAdapter};
pub use config::{parse_allowed_users, TelegramConfig};
pub use runner::{addressed_to_other_bot, run_dispatcher, INLINE_CACHE_TIME_SECS};
