//! Dispatcher: converts teloxide updates to core types and hands them to the HandlerChain
//! or the inline query handler. Per-chat ordering is kept by teloxide's dispatcher.

use anyhow::Result;
use botkit_chain::HandlerChain;
use botkit_core::{
    parse_command, InlineArticle, InlineQueryHandler, Message as CoreMessage, ToCoreInlineQuery,
    ToCoreMessage,
};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{
    InlineQueryResult, InlineQueryResultArticle, InputMessageContent, InputMessageContentText,
};
use tracing::{debug, error, info, instrument};

use super::adapters::{TelegramInlineQueryWrapper, TelegramMessageWrapper};

/// How long Telegram may cache inline results.
pub const INLINE_CACHE_TIME_SECS: u32 = 300;

#[derive(Clone)]
struct BotUsername(Option<String>);

#[derive(Clone)]
struct InlineSlot(Option<Arc<dyn InlineQueryHandler>>);

/// Runs long polling until Ctrl-C. Messages go through `handler_chain`; inline queries go to
/// `inline_handler` when one is given and are ignored otherwise.
#[instrument(skip(bot, handler_chain, inline_handler))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    inline_handler: Option<Arc<dyn InlineQueryHandler>>,
) -> Result<()> {
    let username = match bot.get_me().await {
        Ok(me) => {
            info!(username = ?me.user.username, "Bot identity fetched");
            me.user.username.clone()
        }
        Err(e) => {
            error!(error = %e, "get_me failed, commands for other bots will not be filtered");
            None
        }
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_inline_query().endpoint(on_inline_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            handler_chain,
            BotUsername(username),
            InlineSlot(inline_handler)
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}

/// True when the message is a command explicitly addressed to a different bot (`/cmd@other_bot`).
pub fn addressed_to_other_bot(message: &CoreMessage, bot_username: Option<&str>) -> bool {
    bot_username.is_some()
        && parse_command(&message.content, None).is_some()
        && parse_command(&message.content, bot_username).is_none()
}

async fn on_message(
    msg: teloxide::types::Message,
    chain: HandlerChain,
    username: BotUsername,
) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        kind = ?core_msg.kind,
        "Received message"
    );

    if addressed_to_other_bot(&core_msg, username.0.as_deref()) {
        debug!(chat_id = core_msg.chat.id, "Command for another bot, skipped");
        return Ok(());
    }

    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, chat_id = core_msg.chat.id, "Handler chain failed");
    }
    Ok(())
}

fn to_result(article: InlineArticle) -> InlineQueryResult {
    let content = InputMessageContent::Text(InputMessageContentText::new(article.text));
    let mut result = InlineQueryResultArticle::new(article.id, article.title, content);
    if let Some(description) = article.description {
        result = result.description(description);
    }
    InlineQueryResult::Article(result)
}

async fn on_inline_query(
    bot: teloxide::Bot,
    query: teloxide::types::InlineQuery,
    inline: InlineSlot,
) -> ResponseResult<()> {
    let Some(handler) = inline.0 else {
        return Ok(());
    };

    let core_query = TelegramInlineQueryWrapper(&query).to_core();
    info!(user_id = core_query.from.id, query = %core_query.query, "Received inline query");

    let articles = match handler.answer(&core_query).await {
        Ok(articles) => articles,
        Err(e) => {
            error!(error = %e, user_id = core_query.from.id, "Inline query handler failed");
            return Ok(());
        }
    };

    let count = articles.len();
    let results: Vec<InlineQueryResult> = articles.into_iter().map(to_result).collect();
    match bot
        .answer_inline_query(query.id.clone(), results)
        .cache_time(INLINE_CACHE_TIME_SECS)
        .await
    {
        Ok(_) => debug!(user_id = core_query.from.id, results = count, "Answered inline query"),
        Err(e) => error!(error = %e, user_id = core_query.from.id, "Failed to answer inline query"),
    }
    Ok(())
}
