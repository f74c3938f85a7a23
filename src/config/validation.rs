//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::collections::HashSet;
use crate::models::Destination;
use crate::utils::errors::{LessonRelayError, Result};
use crate::handlers::callbacks::SEND_TO_PREFIX;
use super::{Settings, ShareMode};

/// Telegram limit for callback button payloads
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_link_config(&settings.links)?;
    validate_post_config(&settings.post)?;
    validate_destinations(&settings.destinations)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(LessonRelayError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() {
        return Err(LessonRelayError::Config(
            "At least one admin ID must be configured".to_string()
        ));
    }

    Ok(())
}

/// Validate lesson link configuration
fn validate_link_config(config: &super::LinkConfig) -> Result<()> {
    if config.source_host.is_empty() || config.query_param.is_empty() {
        return Err(LessonRelayError::Config(
            "Lesson link host and query parameter are required".to_string()
        ));
    }

    if !config.media_extension.starts_with('.') {
        return Err(LessonRelayError::Config(
            format!("Media extension must start with a dot: {}", config.media_extension)
        ));
    }

    url::Url::parse(&config.player_base_url).map_err(|e| {
        LessonRelayError::Config(format!("Invalid player base URL {}: {}", config.player_base_url, e))
    })?;

    if config.player_param.is_empty() {
        return Err(LessonRelayError::Config(
            "Player query parameter is required".to_string()
        ));
    }

    Ok(())
}

/// Validate post configuration
fn validate_post_config(config: &super::PostConfig) -> Result<()> {
    if config.watch_label.is_empty() || config.notes_label.is_empty() || config.share_label.is_empty() {
        return Err(LessonRelayError::Config(
            "Button labels must not be empty".to_string()
        ));
    }

    match config.share.mode {
        ShareMode::InlineQuery => {
            if config.share.query.trim().is_empty() {
                return Err(LessonRelayError::Config(
                    "Share query is required for inline_query share mode".to_string()
                ));
            }
        }
        ShareMode::ShareUrl => {
            url::Url::parse(&config.share.link).map_err(|e| {
                LessonRelayError::Config(format!("Invalid share link {}: {}", config.share.link, e))
            })?;
        }
    }

    if config.share.message.is_empty() {
        return Err(LessonRelayError::Config(
            "Share message is required".to_string()
        ));
    }

    Ok(())
}

/// Validate the destination table
fn validate_destinations(destinations: &[Destination]) -> Result<()> {
    let mut seen = HashSet::new();

    for destination in destinations {
        if destination.name.trim().is_empty() {
            return Err(LessonRelayError::Config(
                "Destination name must not be empty".to_string()
            ));
        }

        if !seen.insert(destination.name.as_str()) {
            return Err(LessonRelayError::Config(
                format!("Duplicate destination name: {}", destination.name)
            ));
        }

        let payload_len = SEND_TO_PREFIX.len() + destination.name.len();
        if payload_len > MAX_CALLBACK_DATA_BYTES {
            return Err(LessonRelayError::Config(
                format!(
                    "Destination name too long for a button payload: {} ({} bytes, max {})",
                    destination.name,
                    payload_len,
                    MAX_CALLBACK_DATA_BYTES
                )
            ));
        }

        if destination.chat_id == 0 {
            return Err(LessonRelayError::Config(
                format!("Destination {} has no chat id", destination.name)
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LessonRelayError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LessonRelayError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
