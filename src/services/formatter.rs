//! Post formatting
//!
//! Turns a filled session into the final HTML text and button list. The
//! output depends only on the session and the post configuration, so
//! formatting the same session twice yields identical posts.

use teloxide::utils::html;
use crate::config::{PostConfig, ShareMode};
use crate::models::{Post, PostButton, Session};
use crate::utils::helpers::is_http_link;

/// Telegram share sheet endpoint
const SHARE_URL_BASE: &str = "https://t.me/share/url";

/// Builds posts from sessions
#[derive(Debug, Clone)]
pub struct PostFormatter {
    config: PostConfig,
}

impl PostFormatter {
    pub fn new(config: PostConfig) -> Self {
        Self { config }
    }

    /// Format the session's fields into a post
    pub fn format(&self, session: &Session) -> Post {
        Post {
            text: self.format_text(session),
            buttons: self.format_buttons(session),
        }
    }

    fn format_text(&self, session: &Session) -> String {
        let mut lines = Vec::with_capacity(5);

        if !session.title().is_empty() {
            lines.push(format!("<b>📌 {}</b>", html::escape(session.title())));
        }
        if !session.date().is_empty() {
            lines.push(format!("🗓️ {}", html::escape(session.date())));
        }
        lines.push(self.config.body.clone());
        lines.push(String::new());
        lines.push(self.config.footer.clone());

        lines.join("\n")
    }

    fn format_buttons(&self, session: &Session) -> Vec<PostButton> {
        let mut buttons = vec![PostButton::url(&self.config.watch_label, session.player_link())];

        if is_http_link(session.notes()) {
            buttons.push(PostButton::url(&self.config.notes_label, session.notes()));
        }

        buttons.push(self.share_button());
        buttons
    }

    fn share_button(&self) -> PostButton {
        let share = &self.config.share;
        match share.mode {
            ShareMode::InlineQuery => PostButton::switch_inline_query(&self.config.share_label, &share.query),
            ShareMode::ShareUrl => PostButton::url(
                &self.config.share_label,
                format!(
                    "{}?url={}&text={}",
                    SHARE_URL_BASE,
                    urlencoding::encode(&share.link),
                    urlencoding::encode(&share.message)
                ),
            ),
        }
    }
}
