//! Inline mode: typing `@bot some text` in any chat offers Echo / UPPERCASE / lowercase results.
//! Inline mode has to be switched on for the bot in BotFather.

use async_trait::async_trait;
use botkit_core::{InlineArticle, InlineQuery, InlineQueryHandler, Result};
use tracing::debug;

pub const EMPTY_QUERY_HINT: &str = "Type some text after the bot's name.";

#[derive(Default)]
pub struct EchoInlineHandler;

impl EchoInlineHandler {
    pub fn articles(query: &str) -> Vec<InlineArticle> {
        let query = query.trim();
        if query.is_empty() {
            return vec![InlineArticle::new("hint", "Nothing to echo yet", EMPTY_QUERY_HINT)
                .description(EMPTY_QUERY_HINT)];
        }
        vec![
            InlineArticle::new("echo", format!("Echo: {}", query), query).description("Send as is"),
            InlineArticle::new("upper", query.to_uppercase(), query.to_uppercase())
                .description("Send in upper case"),
            InlineArticle::new("lower", query.to_lowercase(), query.to_lowercase())
                .description("Send in lower case"),
        ]
    }
}

#[async_trait]
impl InlineQueryHandler for EchoInlineHandler {
    async fn answer(&self, query: &InlineQuery) -> Result<Vec<InlineArticle>> {
        let articles = Self::articles(&query.query);
        debug!(user_id = query.from.id, results = articles.len(), "Built inline results");
        Ok(articles)
    }
}
