//! Chat info command handler
//!
//! Prints the ids an admin needs to fill in the destination table.

use teloxide::{prelude::*, types::Message, utils::html};
use crate::handlers::{reply_html, thread_number, topic_of};
use crate::middleware::logging::chat_type;
use crate::utils::errors::Result;

pub fn chat_info_text(msg: &Message) -> String {
    let mut lines = vec![
        "ℹ️ <b>Chat info</b>".to_string(),
        format!("Chat ID: <code>{}</code>", msg.chat.id.0),
        format!("Type: {}", chat_type(msg)),
    ];

    if let Some(title) = msg.chat.title() {
        lines.push(format!("Title: {}", html::escape(title)));
    }
    if let Some(thread_id) = topic_of(msg) {
        lines.push(format!("Thread ID: <code>{}</code>", thread_number(thread_id)));
    }
    if let Some(reply) = msg.reply_to_message() {
        lines.push(format!("Replied message ID: <code>{}</code>", reply.id.0));
    }

    lines.join("\n")
}

/// Handle /chatinfo command
pub async fn handle_chatinfo(bot: Bot, msg: Message) -> Result<()> {
    reply_html(&bot, &msg, chat_info_text(&msg)).await?;
    Ok(())
}
