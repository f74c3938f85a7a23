//! Outbound post transport
//!
//! `PostTransport` is the seam between routing logic and Telegram. The
//! production implementation sends through teloxide; `MemoryTransport`
//! records deliveries instead and can be told to fail.

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    sugar::request::RequestLinkPreviewExt,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode, ReplyParameters, ThreadId},
};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use crate::models::{ButtonAction, DeliveryTarget, Post};
use crate::utils::errors::Result;

/// Sends finished posts somewhere
#[async_trait]
pub trait PostTransport: Send + Sync {
    /// Deliver `post` to `target`, returning the id of the sent message
    async fn deliver(&self, target: &DeliveryTarget, post: &Post) -> Result<i32>;
}

/// Inline keyboard for a post, one button per row
pub fn post_keyboard(post: &Post) -> InlineKeyboardMarkup {
    let rows = post
        .buttons
        .iter()
        .filter_map(|button| match &button.action {
            ButtonAction::Url(raw) => match url::Url::parse(raw) {
                Ok(url) => Some(InlineKeyboardButton::url(button.label.clone(), url)),
                Err(e) => {
                    warn!(label = %button.label, url = %raw, error = %e, "Skipping button with invalid URL");
                    None
                }
            },
            ButtonAction::SwitchInlineQuery(query) => Some(InlineKeyboardButton::switch_inline_query(
                button.label.clone(),
                query.clone(),
            )),
        })
        .map(|button| vec![button]);

    InlineKeyboardMarkup::new(rows)
}

/// `PostTransport` backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl PostTransport for TelegramTransport {
    async fn deliver(&self, target: &DeliveryTarget, post: &Post) -> Result<i32> {
        debug!(chat_id = target.chat_id, thread_id = ?target.thread_id,
               reply_to = ?target.reply_to_message_id, "Sending post");

        let mut request = self
            .bot
            .send_message(ChatId(target.chat_id), post.text.clone())
            .parse_mode(ParseMode::Html)
            .disable_link_preview(true)
            .reply_markup(post_keyboard(post));

        if let Some(thread_id) = target.thread_id {
            request = request.message_thread_id(ThreadId(MessageId(thread_id)));
        }

        if let Some(reply_to) = target.reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(reply_to)));
        }

        let message = request.await?;
        Ok(message.id.0)
    }
}

/// Transport that keeps deliveries in memory
#[derive(Debug, Default)]
pub struct MemoryTransport {
    deliveries: Mutex<Vec<(DeliveryTarget, Post)>>,
    failure: Mutex<Option<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following delivery fail with a Telegram-style description
    pub async fn fail_with(&self, description: impl Into<String>) {
        *self.failure.lock().await = Some(description.into());
    }

    /// Let deliveries succeed again
    pub async fn recover(&self) {
        *self.failure.lock().await = None;
    }

    /// Everything delivered so far, in order
    pub async fn deliveries(&self) -> Vec<(DeliveryTarget, Post)> {
        self.deliveries.lock().await.clone()
    }
}

#[async_trait]
impl PostTransport for MemoryTransport {
    async fn deliver(&self, target: &DeliveryTarget, post: &Post) -> Result<i32> {
        if let Some(description) = self.failure.lock().await.clone() {
            return Err(teloxide::RequestError::Api(teloxide::ApiError::Unknown(description)).into());
        }

        let mut deliveries = self.deliveries.lock().await;
        deliveries.push((*target, post.clone()));
        Ok(deliveries.len() as i32)
    }
}
