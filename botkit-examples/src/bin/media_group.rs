use botkit_examples::recipes::media;
use botkit_examples::run_bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot("media-group-bot", |bot, _| media::chain(bot), None).await
}
