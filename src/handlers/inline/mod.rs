//! Inline query handler
//!
//! Answers the share button's inline query with the promotional message.
//! Inline queries are public: anyone who presses a share button may ask.

use teloxide::{
    prelude::*,
    types::{InlineQuery, InlineQueryResult, InlineQueryResultArticle, InputMessageContent, InputMessageContentText},
};
use tracing::debug;
use crate::config::{ShareConfig, ShareMode};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Result id of the share article
pub const SHARE_ARTICLE_ID: &str = "share";

const SHARE_CACHE_SECONDS: u32 = 1;

/// Results for `query`; empty unless it is the configured share query
pub fn share_results(share: &ShareConfig, query: &str) -> Vec<InlineQueryResult> {
    if share.mode != ShareMode::InlineQuery || query.trim() != share.query {
        return Vec::new();
    }

    let article = InlineQueryResultArticle::new(
        SHARE_ARTICLE_ID.to_string(),
        share.article_title.clone(),
        InputMessageContent::Text(InputMessageContentText::new(share.message.clone())),
    )
    .description(share.article_description.clone());

    vec![InlineQueryResult::Article(article)]
}

/// Handle inline queries
pub async fn handle_inline_query(bot: Bot, query: InlineQuery, services: ServiceFactory) -> Result<()> {
    let results = share_results(&services.settings.post.share, &query.query);
    debug!(user_id = query.from.id.0, query = %query.query, results = results.len(), "Answering inline query");

    bot.answer_inline_query(query.id.clone(), results)
        .cache_time(SHARE_CACHE_SECONDS)
        .await?;
    Ok(())
}
