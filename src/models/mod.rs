//! Data models module
//!
//! This module contains the data structures that flow between the
//! conversation, formatting and delivery layers.

pub mod destination;
pub mod post;
pub mod session;

// Re-export commonly used models
pub use destination::{DeliveryTarget, Destination};
pub use post::{ButtonAction, Post, PostButton};
pub use session::{CollectionState, Field, Session, Transition};
