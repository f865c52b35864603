use std::sync::Arc;

use botkit_chain::HandlerChain;
use botkit_examples::recipes::inline::EchoInlineHandler;
use botkit_examples::run_bot;
use botkit_middleware::LoggingMiddleware;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_bot(
        "inline-bot",
        |_, _| HandlerChain::new().add_middleware(Arc::new(LoggingMiddleware)),
        Some(Arc::new(EchoInlineHandler)),
    )
    .await
}
