use botkit_core::RetryPolicy;
use botkit_examples::recipes::retry;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot(
        "retry-bot",
        |bot, _| retry::chain(bot, RetryPolicy::default()),
        None,
    )
    .await
}
