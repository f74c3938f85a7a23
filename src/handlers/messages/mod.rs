//! Message handlers module
//!
//! Private messages from admins either start a block (lesson link) or fill
//! the next field of the block in progress.

use teloxide::{prelude::*, types::Message};
use tracing::debug;
use crate::handlers::{callbacks::send_destination_picker, reply_error, reply_html};
use crate::middleware::AdminUser;
use crate::models::{DeliveryTarget, Field, Post, Transition};
use crate::services::ServiceFactory;
use crate::utils::errors::{LessonRelayError, Result};

/// Reply sent when a lesson link was accepted
pub const LINK_ACCEPTED: &str = "✅ Link processed.";

/// Prefix of the reminder sent when an unknown command arrives mid-block
pub const UNKNOWN_COMMAND: &str = "⚠️ Unknown command. Text starting with / is not used as a field value.";

/// Handle incoming private text messages
pub async fn handle_message(bot: Bot, msg: Message, services: ServiceFactory, admin: AdminUser) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Commands the bot does not know are not field values
    if text.starts_with('/') {
        debug!(user_id = admin.id, text = %text, "Ignoring unknown command");
        return remind_awaited_field(&bot, &msg, &services, admin).await;
    }

    if services.links.is_match(text) {
        return handle_lesson_link(&bot, &msg, &services, admin, text).await;
    }

    collect_input(&bot, &msg, &services, admin, text).await
}

/// Repeat the awaited field's prompt, if a block is being collected
async fn remind_awaited_field(bot: &Bot, msg: &Message, services: &ServiceFactory, admin: AdminUser) -> Result<()> {
    let awaiting = services
        .conversation
        .session(admin.id)
        .await
        .and_then(|session| session.awaiting());

    if let Some(field) = awaiting {
        reply_html(bot, msg, format!("{}\n{}", UNKNOWN_COMMAND, field.prompt())).await?;
    }
    Ok(())
}

async fn handle_lesson_link(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    admin: AdminUser,
    text: &str,
) -> Result<()> {
    match services.links.extract(text) {
        Ok(link) => {
            services.conversation.start(admin.id, &link).await;
            reply_html(bot, msg, format!("{}\n{}", LINK_ACCEPTED, Field::Title.prompt())).await?;
            Ok(())
        }
        Err(e) => reply_error(bot, msg, &LessonRelayError::from(e)).await,
    }
}

/// Feed `text` into the admin's block and answer with the next step
pub async fn collect_input(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    admin: AdminUser,
    text: &str,
) -> Result<()> {
    match services.conversation.handle_input(admin.id, text).await {
        None => Ok(()),
        Some(Transition::Prompt(field)) => {
            reply_html(bot, msg, field.prompt()).await?;
            Ok(())
        }
        Some(Transition::Completed(post)) => send_preview(bot, msg, services, &post).await,
    }
}

/// Show the finished post to its author followed by the destination picker
async fn send_preview(bot: &Bot, msg: &Message, services: &ServiceFactory, post: &Post) -> Result<()> {
    let preview = DeliveryTarget::chat(msg.chat.id.0);
    if let Err(e) = services.transport.deliver(&preview, post).await {
        return reply_error(bot, msg, &e).await;
    }

    send_destination_picker(bot, msg.chat.id, services.router.destinations()).await
}
