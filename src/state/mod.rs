//! State management module
//!
//! This module holds the in-memory stores: per-user sessions and the
//! archive of saved blocks.

pub mod archive;
pub mod storage;

// Re-export commonly used state components
pub use archive::{ArchivedBlock, BlockArchive, InMemoryBlockArchive, BLOCK_ID_LENGTH};
pub use storage::{InMemorySessionStore, SessionStore};
