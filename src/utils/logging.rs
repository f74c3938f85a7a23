//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the LessonRelay application.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{LessonRelayError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "lessonrelay.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = if config.json {
                tracing_subscriber::fmt::layer().json().with_writer(non_blocking).boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LessonRelayError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log block lifecycle steps (link accepted, field filled, completed, saved)
pub fn log_block_event(user_id: i64, event: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        event = event,
        details = details,
        "Block event"
    );
}

/// Log the outcome of a post delivery
pub fn log_delivery(user_id: i64, destination: &str, chat_id: i64, thread_id: Option<i32>, success: bool) {
    if success {
        info!(
            user_id = user_id,
            destination = destination,
            chat_id = chat_id,
            thread_id = thread_id,
            "Post delivered"
        );
    } else {
        warn!(
            user_id = user_id,
            destination = destination,
            chat_id = chat_id,
            thread_id = thread_id,
            "Post delivery failed"
        );
    }
}

/// Log rejected senders
pub fn log_unauthorized(user_id: Option<i64>, action: &str) {
    warn!(
        user_id = user_id,
        action = action,
        "Unauthorized access attempt"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>) {
    debug!(
        admin_id = admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}
