//! Callback query handlers module
//!
//! The only callbacks are the destination picker buttons shown after a block
//! is finished. Their payload is `send_to:<destination name>`.

use teloxide::{
    prelude::*,
    types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    utils::html,
};
use tracing::{debug, info, warn};
use crate::handlers::log_handled;
use crate::middleware::AdminUser;
use crate::models::Destination;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Callback payload prefix of destination picker buttons
pub const SEND_TO_PREFIX: &str = "send_to:";

/// Header of the destination picker message
pub const PICKER_TEXT: &str = "📤 Where should this block go?";

/// One button per destination, in configured order
pub fn destination_keyboard(destinations: &[Destination]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(destinations.iter().map(|destination| {
        vec![InlineKeyboardButton::callback(
            destination.name.clone(),
            format!("{}{}", SEND_TO_PREFIX, destination.name),
        )]
    }))
}

/// Show the destination picker in `chat_id`
pub async fn send_destination_picker(bot: &Bot, chat_id: ChatId, destinations: &[Destination]) -> Result<()> {
    if destinations.is_empty() {
        bot.send_message(chat_id, "ℹ️ No destinations are configured. Use /save to keep the block for later.")
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, PICKER_TEXT)
        .reply_markup(destination_keyboard(destinations))
        .await?;
    Ok(())
}

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
    admin: AdminUser,
) -> Result<()> {
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(admin.id));

    let Some(name) = query.data.as_deref().and_then(|d| d.strip_prefix(SEND_TO_PREFIX)) else {
        warn!(user_id = admin.id, data = ?query.data, "Unknown callback payload");
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    debug!(user_id = admin.id, destination = %name, "Destination picked");

    match services.router.route(admin.id, name).await {
        Ok(delivery) => {
            info!(user_id = admin.id, destination = %delivery.destination,
                  message_id = delivery.message_id, "Block delivered");
            bot.answer_callback_query(query.id.clone())
                .text(format!("✅ Sent to {}", delivery.destination))
                .await?;
            bot.send_message(
                chat_id,
                format!("✅ Block sent to <b>{}</b>.", html::escape(&delivery.destination)),
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
        Err(e) => {
            log_handled(&e);
            bot.answer_callback_query(query.id.clone()).await?;
            bot.send_message(chat_id, e.user_message()).await?;
        }
    }

    Ok(())
}
