use botkit_examples::recipes::auth;
use botkit_examples::run_bot;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot(
        "auth-bot",
        |bot, config| {
            if config.allowed_users.is_empty() {
                warn!("ALLOWED_USERS is empty, every user will be denied");
            }
            auth::chain(bot, &config.allowed_users)
        },
        None,
    )
    .await
}
