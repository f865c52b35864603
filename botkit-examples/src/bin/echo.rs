use botkit_examples::recipes::echo;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot("echo-bot", |bot, _| echo::chain(bot), None).await
}
