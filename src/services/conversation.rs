//! Conversation controller
//!
//! Drives the per-user collection flow: a lesson link opens a session, then
//! each text message fills exactly one field (title, date, notes) until the
//! post is built.

use std::sync::Arc;
use tracing::debug;
use crate::models::{Field, Post, Session, Transition};
use crate::services::formatter::PostFormatter;
use crate::services::link::LessonLink;
use crate::state::SessionStore;
use crate::utils::errors::{LessonRelayError, Result};
use crate::utils::logging::log_block_event;

/// Message text meaning "leave this field blank"
pub const SKIP_TOKEN: &str = "/empty";

/// Collection state machine over the session store
pub struct ConversationController {
    store: Arc<dyn SessionStore>,
    formatter: PostFormatter,
}

impl ConversationController {
    pub fn new(store: Arc<dyn SessionStore>, formatter: PostFormatter) -> Self {
        Self { store, formatter }
    }

    /// Open a session for `owner_id`, replacing any session in progress
    pub async fn start(&self, owner_id: i64, link: &LessonLink) -> Session {
        let session = Session::new(owner_id, link.player_link.clone());
        self.store.save(session.clone()).await;
        log_block_event(owner_id, "link_accepted", Some(&link.media_url));
        session
    }

    /// Feed one message into the owner's session.
    ///
    /// Returns `None` when the owner has no session or the session is
    /// already complete; such messages are ordinary chat.
    pub async fn handle_input(&self, owner_id: i64, text: &str) -> Option<Transition> {
        let Some(mut session) = self.store.load(owner_id).await else {
            debug!(user_id = owner_id, "No session, ignoring message");
            return None;
        };

        let value = if text == SKIP_TOKEN { String::new() } else { text.to_string() };
        let filled = session.awaiting();

        let transition = session.advance(value, |s| self.formatter.format(s));
        let Some(transition) = transition else {
            debug!(user_id = owner_id, "Session already complete, ignoring message");
            return None;
        };

        self.store.save(session).await;

        match &transition {
            Transition::Prompt(next) => {
                debug!(user_id = owner_id, filled = ?filled, next = %next, "Field collected");
            }
            Transition::Completed(_) => log_block_event(owner_id, "completed", None),
        }

        Some(transition)
    }

    /// Current session of `owner_id`
    pub async fn session(&self, owner_id: i64) -> Option<Session> {
        self.store.load(owner_id).await
    }

    /// The owner's finished post, or why there is none
    pub async fn finished_post(&self, owner_id: i64) -> Result<Post> {
        let session = self
            .store
            .load(owner_id)
            .await
            .ok_or(LessonRelayError::NoActiveBlock { user_id: owner_id })?;

        finished_post_of(&session)
    }

    pub fn formatter(&self) -> &PostFormatter {
        &self.formatter
    }
}

/// The post of a complete session, or the field it still waits for
pub(crate) fn finished_post_of(session: &Session) -> Result<Post> {
    match session.post() {
        Some(post) => Ok(post.clone()),
        None => Err(LessonRelayError::BlockIncomplete {
            user_id: session.owner_id(),
            awaiting: session.awaiting().unwrap_or(Field::Title),
        }),
    }
}
