use botkit_examples::recipes::composition;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot("middleware-bot", |bot, _| composition::chain(bot), None).await
}
