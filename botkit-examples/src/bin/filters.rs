use botkit_examples::recipes::filters;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot("filters-bot", |bot, _| filters::chain(bot), None).await
}
