use botkit_examples::recipes::session;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot(
        "session-bot",
        |bot, _| session::chain(bot, session::default_sessions()),
        None,
    )
    .await
}
