//! Middleware module
//!
//! This module contains middleware applied around dispatch: the admin
//! allow-list guard and update logging.

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{reject_unauthorized, AdminUser, AuthGuard};
pub use logging::LoggingMiddleware;
