use botkit_examples::recipes::errors;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot("error-boundary-bot", |bot, _| errors::chain(bot), None).await
}
