//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for the destination picker
//! - Message handlers for lesson links and field input
//! - Inline query handlers for the share button
//!
//! [`schema`] wires them into one dptree handler behind the admin guard.

pub mod callbacks;
pub mod commands;
pub mod inline;
pub mod messages;

use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    prelude::*,
    types::{MessageId, ParseMode, ThreadId, Update},
    utils::html,
};
use tracing::{error, info, warn};
use crate::middleware::{reject_unauthorized, AuthGuard, LoggingMiddleware};
use crate::utils::errors::{ErrorSeverity, LessonRelayError, Result};

pub use callbacks::{handle_callback_query, send_destination_picker, SEND_TO_PREFIX};
pub use commands::{handle_command, Command};
pub use inline::handle_inline_query;
pub use messages::handle_message;

/// The full update handler.
///
/// Expects `Me`, `ServiceFactory`, `AuthGuard` and `LoggingMiddleware` in
/// the dependency map.
pub fn schema() -> UpdateHandler<LessonRelayError> {
    let admin_updates = dptree::filter_map(|update: Update, guard: AuthGuard| guard.admit(&update))
        .branch(
            Update::filter_message()
                .branch(dptree::entry().filter_command::<Command>().endpoint(handle_command))
                .branch(dptree::filter(|msg: Message| msg.chat.is_private()).endpoint(handle_message)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback_query));

    // Channel posts carry no sender, so only the read-only /chatinfo is served there
    let channel_posts = Update::filter_channel_post()
        .filter_command::<Command>()
        .filter(|cmd: Command| cmd == Command::Chatinfo)
        .endpoint(commands::chatinfo::handle_chatinfo);

    dptree::entry()
        .inspect(|update: Update, logger: LoggingMiddleware| logger.log_update(&update))
        .branch(Update::filter_inline_query().endpoint(handle_inline_query))
        .branch(channel_posts)
        .branch(admin_updates)
        .branch(dptree::endpoint(reject_unauthorized))
}

/// Topic of `msg`, if it was sent inside a forum topic
pub fn topic_of(msg: &Message) -> Option<ThreadId> {
    if msg.is_topic_message {
        msg.thread_id
    } else {
        None
    }
}

/// Send an HTML reply into the chat and topic of `msg`
pub async fn reply_html(bot: &Bot, msg: &Message, text: impl Into<String>) -> Result<Message> {
    let mut request = bot
        .send_message(msg.chat.id, text.into())
        .parse_mode(ParseMode::Html);

    if let Some(thread_id) = topic_of(msg) {
        request = request.message_thread_id(thread_id);
    }

    Ok(request.await?)
}

/// Report a recovered error to the user who caused it
pub async fn reply_error(bot: &Bot, msg: &Message, error: &LessonRelayError) -> Result<()> {
    log_handled(error);
    reply_html(bot, msg, html::escape(&error.user_message())).await?;
    Ok(())
}

pub(crate) fn log_handled(error: &LessonRelayError) {
    match error.severity() {
        ErrorSeverity::Info => info!(error = %error, "Request rejected"),
        ErrorSeverity::Warning => warn!(error = %error, "Request failed"),
        _ => error!(error = %error, "Request failed"),
    }
}

/// Thread id as the plain number used in configuration
pub(crate) fn thread_number(thread_id: ThreadId) -> i32 {
    let ThreadId(MessageId(id)) = thread_id;
    id
}
