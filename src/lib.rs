//! LessonRelay Telegram Bot
//!
//! Turns shared lesson links into formatted posts with watch, notes and
//! share buttons, and relays them to preconfigured channels, groups and
//! forum topics. Finished posts can also be archived and reposted on demand.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{LessonRelayError, Result};

// Re-export main components for easy access
pub use middleware::{AuthGuard, LoggingMiddleware};
pub use services::ServiceFactory;
pub use state::{BlockArchive, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
