//! Shared startup for the recipe binaries: .env, config, tracing, client, dispatcher.

use std::sync::Arc;

use anyhow::Result;
use botkit_chain::HandlerChain;
use botkit_core::{init_tracing, Bot, InlineQueryHandler};
use botkit_telegram::{run_dispatcher, TelegramBotAdapter, TelegramConfig};
use chrono::Local;
use tracing::info;

/// Loads config from the environment, initialises logging to `logs/<name>.log` (or LOG_FILE),
/// builds the chain with `build` and runs until Ctrl-C.
pub async fn run_bot<F>(
    name: &str,
    build: F,
    inline_handler: Option<Arc<dyn InlineQueryHandler>>,
) -> Result<()>
where
    F: FnOnce(Arc<dyn Bot>, &TelegramConfig) -> HandlerChain,
{
    dotenvy::dotenv().ok();

    let config = TelegramConfig::from_env()?;
    let log_file = config.log_file_or(name);
    init_tracing(&log_file)?;

    let bot = config.build_bot();
    let core_bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let chain = build(core_bot, &config);

    info!(
        bot = %name,
        start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        log_file = %log_file,
        inline = inline_handler.is_some(),
        "Bot started"
    );

    run_dispatcher(bot, chain, inline_handler).await
}
