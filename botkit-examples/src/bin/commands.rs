use botkit_examples::recipes::commands;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot("commands-bot", |bot, _| commands::chain(bot), None).await
}
