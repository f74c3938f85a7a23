//! Destination model

use serde::{Deserialize, Serialize};

/// Where inside Telegram a post is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTarget {
    pub chat_id: i64,
    /// Forum topic the message is anchored to
    pub thread_id: Option<i32>,
    /// Message the post replies to
    pub reply_to_message_id: Option<i32>,
}

impl DeliveryTarget {
    /// Plain chat target without topic or reply anchor
    pub fn chat(chat_id: i64) -> Self {
        Self {
            chat_id,
            thread_id: None,
            reply_to_message_id: None,
        }
    }

    pub fn in_thread(mut self, thread_id: Option<i32>) -> Self {
        self.thread_id = thread_id;
        self
    }
}

/// Named, admin-configured delivery target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub chat_id: i64,
    #[serde(default)]
    pub thread_id: Option<i32>,
    #[serde(default)]
    pub reply_to_message_id: Option<i32>,
}

impl Destination {
    pub fn target(&self) -> DeliveryTarget {
        DeliveryTarget {
            chat_id: self.chat_id,
            thread_id: self.thread_id,
            reply_to_message_id: self.reply_to_message_id,
        }
    }
}
