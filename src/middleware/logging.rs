//! Logging middleware
//!
//! Logs every inbound update before dispatch. Message text is only logged at
//! debug level.

use teloxide::types::{ChatKind, Message, PublicChatKind, Update, UpdateKind};
use tracing::{debug, info, instrument};
use serde_json::json;
use crate::utils::helpers::truncate_text;

const LOGGED_TEXT_CHARS: usize = 200;

/// Logging middleware for bot interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
}

impl LoggingMiddleware {
    pub fn new(log_user_interactions: bool) -> Self {
        Self { log_user_interactions }
    }

    /// Log incoming update
    #[instrument(skip(self, update), fields(update_id = update.id.0))]
    pub fn log_update(&self, update: &Update) {
        if !self.log_user_interactions {
            return;
        }

        match &update.kind {
            UpdateKind::Message(message) => self.log_message(message),
            UpdateKind::CallbackQuery(callback) => {
                info!(
                    user_id = callback.from.id.0,
                    callback_data = callback.data.as_deref().unwrap_or("none"),
                    "Callback query received"
                );
            }
            UpdateKind::InlineQuery(query) => {
                info!(user_id = query.from.id.0, query = %query.query, "Inline query received");
            }
            other => {
                debug!(update_type = ?std::mem::discriminant(other), "Other update type received");
            }
        }
    }

    fn log_message(&self, message: &Message) {
        let user_info = message.from.as_ref().map(|user| {
            json!({
                "id": user.id.0,
                "username": user.username,
                "first_name": user.first_name,
            })
        });

        let chat_info = json!({
            "id": message.chat.id.0,
            "type": chat_type(message),
            "thread_id": message.thread_id.map(|t| t.0 .0),
        });

        if let Some(text) = message.text() {
            debug!(
                user = ?user_info,
                chat = ?chat_info,
                text = %truncate_text(text, LOGGED_TEXT_CHARS),
                "Text message received"
            );
        }

        info!(
            user = ?user_info,
            chat = ?chat_info,
            message_id = message.id.0,
            "Message received"
        );
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Telegram's name for the kind of chat a message was sent in
pub fn chat_type(message: &Message) -> &'static str {
    match &message.chat.kind {
        ChatKind::Public(public) => match public.kind {
            PublicChatKind::Group => "group",
            PublicChatKind::Supergroup(_) => "supergroup",
            PublicChatKind::Channel(_) => "channel",
        },
        ChatKind::Private(_) => "private",
    }
}
