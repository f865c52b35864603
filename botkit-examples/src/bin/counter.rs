use std::sync::Arc;

use botkit_examples::recipes::counter::{self, MessageCounter};
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot(
        "counter-bot",
        |bot, _| counter::chain(bot, Arc::new(MessageCounter::new())),
        None,
    )
    .await
}
