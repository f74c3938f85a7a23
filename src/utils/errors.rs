//! Error handling for LessonRelay
//!
//! This module defines the main error types used throughout the application
//! and the user-facing text each one turns into at the handler boundary.

use thiserror::Error;
use crate::models::Field;

/// Main error type for LessonRelay application
#[derive(Error, Debug)]
pub enum LessonRelayError {
    #[error("Invalid lesson link: {0}")]
    InvalidLink(#[from] LinkError),

    #[error("Unauthorized sender: {user_id:?}")]
    Unauthorized { user_id: Option<i64> },

    #[error("Unknown destination: {name}")]
    UnknownDestination { name: String },

    #[error("Delivery to {destination} failed ({failure}): {detail}")]
    TransportDelivery {
        destination: String,
        failure: DeliveryFailure,
        detail: String,
    },

    #[error("Block not found: {block_id}")]
    BlockNotFound { block_id: String },

    #[error("No active block for user {user_id}")]
    NoActiveBlock { user_id: i64 },

    #[error("Block for user {user_id} is still waiting for {awaiting}")]
    BlockIncomplete { user_id: i64, awaiting: Field },

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Reasons a lesson link can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("message does not contain a lesson link")]
    NoMatch,

    #[error("malformed URL: {0}")]
    Malformed(String),

    #[error("missing `{0}` query parameter")]
    MissingParameter(String),

    #[error("`{url}` is not a {extension} playlist")]
    NotMediaPlaylist { url: String, extension: String },
}

/// What most likely went wrong when Telegram refused a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    MissingRights,
    ThreadNotFound,
    ChatNotFound,
    ReplyTargetNotFound,
    Other,
}

impl DeliveryFailure {
    /// Classify a Telegram error description
    pub fn classify(description: &str) -> Self {
        let description = description.to_lowercase();

        if description.contains("replied not found") || description.contains("reply message not found") {
            DeliveryFailure::ReplyTargetNotFound
        } else if description.contains("thread not found") || description.contains("topic") {
            DeliveryFailure::ThreadNotFound
        } else if description.contains("chat not found") || description.contains("peer_id_invalid") {
            DeliveryFailure::ChatNotFound
        } else if description.contains("rights")
            || description.contains("forbidden")
            || description.contains("not a member")
            || description.contains("kicked")
            || description.contains("administrator")
        {
            DeliveryFailure::MissingRights
        } else {
            DeliveryFailure::Other
        }
    }

    /// Check the admin should perform next
    pub fn hint(&self) -> &'static str {
        match self {
            DeliveryFailure::MissingRights => "Make sure the bot is a member of the chat and is allowed to post there.",
            DeliveryFailure::ThreadNotFound => "Check that the configured topic/thread id still exists and is open.",
            DeliveryFailure::ChatNotFound => "Check that the configured chat id is correct and the bot was added to it.",
            DeliveryFailure::ReplyTargetNotFound => "The configured reply anchor message no longer exists.",
            DeliveryFailure::Other => "Telegram rejected the message, see the details above.",
        }
    }
}

impl std::fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryFailure::MissingRights => write!(f, "missing rights"),
            DeliveryFailure::ThreadNotFound => write!(f, "thread not found"),
            DeliveryFailure::ChatNotFound => write!(f, "chat not found"),
            DeliveryFailure::ReplyTargetNotFound => write!(f, "reply target not found"),
            DeliveryFailure::Other => write!(f, "rejected"),
        }
    }
}

/// Result type alias for LessonRelay operations
pub type Result<T> = std::result::Result<T, LessonRelayError>;

/// Fixed reply for senders outside the allow-list
pub const UNAUTHORIZED_REPLY: &str = "⛔ You are not allowed to use this bot.";

impl LessonRelayError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            LessonRelayError::InvalidLink(_) => true,
            LessonRelayError::Unauthorized { .. } => true,
            LessonRelayError::UnknownDestination { .. } => true,
            LessonRelayError::TransportDelivery { .. } => true,
            LessonRelayError::BlockNotFound { .. } => true,
            LessonRelayError::NoActiveBlock { .. } => true,
            LessonRelayError::BlockIncomplete { .. } => true,
            LessonRelayError::Telegram(_) => true,
            LessonRelayError::Config(_) => false,
            LessonRelayError::ConfigLoad(_) => false,
            LessonRelayError::Io(_) => true,
            LessonRelayError::UrlParse(_) => false,
            LessonRelayError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LessonRelayError::Config(_) => ErrorSeverity::Critical,
            LessonRelayError::ConfigLoad(_) => ErrorSeverity::Critical,
            LessonRelayError::Unauthorized { .. } => ErrorSeverity::Warning,
            LessonRelayError::UnknownDestination { .. } => ErrorSeverity::Warning,
            LessonRelayError::TransportDelivery { .. } => ErrorSeverity::Warning,
            LessonRelayError::InvalidLink(_) => ErrorSeverity::Info,
            LessonRelayError::BlockNotFound { .. } => ErrorSeverity::Info,
            LessonRelayError::NoActiveBlock { .. } => ErrorSeverity::Info,
            LessonRelayError::BlockIncomplete { .. } => ErrorSeverity::Info,
            LessonRelayError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Text shown to the user when this error reaches a handler
    pub fn user_message(&self) -> String {
        match self {
            LessonRelayError::InvalidLink(LinkError::NotMediaPlaylist { .. }) => {
                "❌ Invalid M3U8 link.".to_string()
            }
            LessonRelayError::InvalidLink(_) => "❌ Error parsing link.".to_string(),
            LessonRelayError::Unauthorized { .. } => UNAUTHORIZED_REPLY.to_string(),
            LessonRelayError::UnknownDestination { name } => {
                format!("❌ Destination \"{}\" is not configured any more. Use /done to pick again.", name)
            }
            LessonRelayError::TransportDelivery { destination, failure, detail } => format!(
                "❌ Could not send to {} ({}).\n{}\n{}\nYour block is kept, try again once fixed.",
                destination,
                failure,
                detail,
                failure.hint()
            ),
            LessonRelayError::BlockNotFound { block_id } => {
                format!("❌ No saved block with id {}.", block_id)
            }
            LessonRelayError::NoActiveBlock { .. } => {
                "ℹ️ No finished block. Send a lesson link first.".to_string()
            }
            LessonRelayError::BlockIncomplete { awaiting, .. } => {
                format!("ℹ️ The block is not finished yet, send the {} or type /empty to skip.", awaiting)
            }
            LessonRelayError::InvalidInput(reason) => format!("❌ {}", reason),
            _ => "⚠️ Something went wrong, please try again.".to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
