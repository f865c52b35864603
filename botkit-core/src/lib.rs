//! # botkit-core
//!
//! Core types and traits shared by every bot recipe: [`Bot`], [`Handler`], [`Middleware`],
//! [`InlineQueryHandler`], message / user / chat types, command parsing, a fixed-delay [`retry`]
//! helper and tracing initialization. Transport-agnostic; used by botkit-chain and botkit-telegram.

pub mod bot;
pub mod command;
pub mod error;
pub mod logger;
pub mod retry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;

pub use bot::{validate_media_group, Bot, MEDIA_GROUP_MAX, MEDIA_GROUP_MIN};
pub use command::{parse_command, parse_number, Command};
pub use error::{BotkitError, HandlerError, Result};
pub use logger::init_tracing;
pub use retry::{retry, RetryPolicy};
pub use types::{
    Chat, ChatKind, ContentKind, Handler, HandlerResponse, InlineArticle, InlineQuery,
    InlineQueryHandler, MediaItem, Message, Middleware, ToCoreInlineQuery, ToCoreMessage,
    ToCoreUser, User,
};
