//! Block commands: /done, /save, /post and /empty

use teloxide::{prelude::*, types::Message};
use tracing::debug;
use crate::handlers::{callbacks::send_destination_picker, messages, reply_error, reply_html, thread_number, topic_of};
use crate::middleware::AdminUser;
use crate::models::DeliveryTarget;
use crate::services::{ServiceFactory, SKIP_TOKEN};
use crate::utils::errors::{LessonRelayError, Result};
use crate::utils::logging::log_admin_action;

/// Handle /done: show the destination picker again
pub async fn handle_done(bot: Bot, msg: Message, services: ServiceFactory, admin: AdminUser) -> Result<()> {
    match services.conversation.finished_post(admin.id).await {
        Ok(_) => send_destination_picker(&bot, msg.chat.id, services.router.destinations()).await,
        Err(e) => reply_error(&bot, &msg, &e).await,
    }
}

/// Handle /save: archive the finished block
pub async fn handle_save(bot: Bot, msg: Message, services: ServiceFactory, admin: AdminUser) -> Result<()> {
    match services.archive.save(admin.id).await {
        Ok(block) => {
            log_admin_action(admin.id, "save_block", Some(&block.id));
            reply_html(
                &bot,
                &msg,
                format!(
                    "💾 Block saved with id <code>{id}</code>.\nPost it in any chat with <code>/post {id}</code>.",
                    id = block.id
                ),
            )
            .await?;
            Ok(())
        }
        Err(e) => reply_error(&bot, &msg, &e).await,
    }
}

/// Handle /post <id>: repost an archived block into this chat and topic
pub async fn handle_post(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    admin: AdminUser,
    block_id: String,
) -> Result<()> {
    if block_id.is_empty() {
        let usage = LessonRelayError::InvalidInput("Usage: /post <block id>".to_string());
        return reply_error(&bot, &msg, &usage).await;
    }

    let target = DeliveryTarget::chat(msg.chat.id.0).in_thread(topic_of(&msg).map(thread_number));
    debug!(user_id = admin.id, block_id = %block_id, target = ?target, "Posting archived block");

    match services.archive.post_by_id(&block_id, target).await {
        Ok(_) => {
            log_admin_action(admin.id, "post_block", Some(&block_id));
            Ok(())
        }
        Err(e) => reply_error(&bot, &msg, &e).await,
    }
}

/// Handle /empty: skip the field being collected
pub async fn handle_empty(bot: Bot, msg: Message, services: ServiceFactory, admin: AdminUser) -> Result<()> {
    if !msg.chat.is_private() {
        return Ok(());
    }
    messages::collect_input(&bot, &msg, &services, admin, SKIP_TOKEN).await
}
