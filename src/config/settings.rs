//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::models::Destination;

/// Environment variable prefix, nested keys use `__` (`LESSONRELAY__BOT__TOKEN`)
pub const ENV_PREFIX: &str = "LESSONRELAY";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub post: PostConfig,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    #[serde(default)]
    pub admin_ids: Vec<i64>,
}

/// Lesson link recognition and player link construction
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkConfig {
    pub source_host: String,
    pub source_path: String,
    pub query_param: String,
    pub media_extension: String,
    pub player_base_url: String,
    pub player_param: String,
}

/// Fixed parts of the generated post
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PostConfig {
    pub body: String,
    pub footer: String,
    pub watch_label: String,
    pub notes_label: String,
    pub share_label: String,
    pub share: ShareConfig,
}

/// How the share button spreads the promotional message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareMode {
    /// `switch_inline_query` button answered by the bot's inline handler
    InlineQuery,
    /// t.me share sheet with the message pre-filled
    ShareUrl,
}

/// Share button configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShareConfig {
    pub mode: ShareMode,
    pub query: String,
    pub message: String,
    pub link: String,
    pub article_title: String,
    pub article_description: String,
}

/// Liveness endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Settings {
    /// Load settings from `config.toml` (optional) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file plus environment variables
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path))
    }

    fn load(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::LessonRelayError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                admin_ids: vec![],
            },
            links: LinkConfig::default(),
            post: PostConfig::default(),
            destinations: vec![],
            health: HealthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            source_host: "theeduverse.xyz".to_string(),
            source_path: "/play".to_string(),
            query_param: "lessonurl".to_string(),
            media_extension: ".m3u8".to_string(),
            player_base_url: "https://studysmarterx.netlify.app/player".to_string(),
            player_param: "url".to_string(),
        }
    }
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            body: "🔗 Lecture and notes available below.".to_string(),
            footer: "Provided by @studysmarterhub — share us for more!".to_string(),
            watch_label: "▶️ Watch Lecture".to_string(),
            notes_label: "📝 View Notes".to_string(),
            share_label: "🔗 Share".to_string(),
            share: ShareConfig::default(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            mode: ShareMode::InlineQuery,
            query: "share_aarambh".to_string(),
            message: "📢 Join us for Aarambh batch at @aarambh_batch_10th\nand our backup at @studysmarterhub.".to_string(),
            link: "https://t.me/studysmarterhub".to_string(),
            article_title: "Share Aarambh Batch".to_string(),
            article_description: "Click to share this".to_string(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 10000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
