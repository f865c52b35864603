//! Reply helpers shared by the recipes.

use botkit_core::{Bot, HandlerError, HandlerResponse, Message, Result};
use tracing::{info, warn};

/// Sends `text` as a reply and ends the chain with `Reply(text)`.
pub async fn reply(bot: &dyn Bot, message: &Message, text: impl Into<String>) -> Result<HandlerResponse> {
    let text = text.into();
    bot.reply_to(message, &text).await?;
    info!(chat_id = message.chat.id, reply_len = text.len(), "Sent reply");
    Ok(HandlerResponse::Reply(text))
}

/// Replies with the outcome of a command: the text on success, `Usage: ...` on a usage error.
/// Other errors propagate.
pub async fn reply_or_usage(
    bot: &dyn Bot,
    message: &Message,
    outcome: std::result::Result<String, HandlerError>,
) -> Result<HandlerResponse> {
    match outcome {
        Ok(text) => reply(bot, message, text).await,
        Err(HandlerError::Usage(usage)) => {
            warn!(chat_id = message.chat.id, usage = %usage, "Rejected command arguments");
            reply(bot, message, format!("Usage: {}", usage)).await
        }
        Err(e) => Err(e.into()),
    }
}
