//! Authentication middleware
//!
//! A single allow-list guard applied at the dispatch boundary. Updates from
//! admins pass through carrying an `AdminUser`; everything else ends up in
//! `reject_unauthorized`.

use std::collections::HashSet;
use std::sync::Arc;
use teloxide::{prelude::*, types::{Update, UpdateKind, User}};
use tracing::debug;
use crate::config::BotConfig;
use crate::services::ServiceFactory;
use crate::utils::errors::{LessonRelayError, Result, UNAUTHORIZED_REPLY};
use crate::utils::logging::log_unauthorized;

/// A sender that passed the allow-list check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser {
    pub id: i64,
}

/// Allow-list guard
#[derive(Debug, Clone)]
pub struct AuthGuard {
    admin_ids: Arc<HashSet<i64>>,
}

impl AuthGuard {
    pub fn new(config: &BotConfig) -> Self {
        Self::from_ids(config.admin_ids.iter().copied())
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            admin_ids: Arc::new(ids.into_iter().collect()),
        }
    }

    /// Check if user is an admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Admit the sender if they are on the allow-list
    pub fn authorize(&self, user: Option<&User>) -> Result<AdminUser> {
        let user_id = user.map(|u| u.id.0 as i64);

        match user_id {
            Some(id) if self.is_admin(id) => {
                debug!(user_id = id, "Admin authentication successful");
                Ok(AdminUser { id })
            }
            _ => Err(LessonRelayError::Unauthorized { user_id }),
        }
    }

    /// `filter_map` form of [`AuthGuard::authorize`] for dptree
    pub fn admit(&self, update: &Update) -> Option<AdminUser> {
        self.authorize(update.from()).ok()
    }

    pub fn admin_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.admin_ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Fallback endpoint for updates no admin branch handled.
///
/// Admin updates that reach this point are ignored. Outsiders get the fixed
/// rejection for commands, lesson links and button presses; their ordinary
/// chat text is ignored.
pub async fn reject_unauthorized(
    bot: Bot,
    update: Update,
    guard: AuthGuard,
    services: ServiceFactory,
) -> Result<()> {
    if guard.admit(&update).is_some() {
        return Ok(());
    }

    let user_id = update.from().map(|u| u.id.0 as i64);

    match &update.kind {
        UpdateKind::Message(message) => {
            let Some(text) = message.text() else {
                return Ok(());
            };
            let is_command = text.starts_with('/');
            if !is_command && !services.links.is_match(text) {
                return Ok(());
            }

            log_unauthorized(user_id, if is_command { "command" } else { "lesson_link" });
            bot.send_message(message.chat.id, UNAUTHORIZED_REPLY).await?;
        }
        UpdateKind::CallbackQuery(query) => {
            log_unauthorized(user_id, "button_press");
            bot.answer_callback_query(query.id.clone())
                .text(UNAUTHORIZED_REPLY)
                .show_alert(true)
                .await?;
        }
        _ => {}
    }

    Ok(())
}
