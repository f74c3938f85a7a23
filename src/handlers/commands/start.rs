//! Start command handler

use teloxide::{prelude::*, types::Message, utils::html};
use tracing::debug;
use crate::config::LinkConfig;
use crate::handlers::reply_html;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Welcome text showing the lesson link shape the bot expects
pub fn welcome_text(links: &LinkConfig) -> String {
    let example = format!(
        "https://{}{}?{}=...",
        links.source_host, links.source_path, links.query_param
    );

    format!(
        "🎓 Welcome to the Study Smarter Bot!\n\n\
         Just send a lesson link like:\n<code>{}</code>\n\n\
         I will ask for the title, date and notes, then build the post and \
         let you pick where it goes. Use /help for all commands.",
        html::escape(&example)
    )
}

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "Processing /start command");
    reply_html(&bot, &msg, welcome_text(&services.settings.links)).await?;
    Ok(())
}
