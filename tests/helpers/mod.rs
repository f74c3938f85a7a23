//! Test helpers module
//!
//! This module provides utilities and helpers for testing the LessonRelay
//! bot: a mock Bot API server, JSON-built Telegram objects and a shared
//! test context.

#![allow(dead_code)]

pub mod telegram_mock;

pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
