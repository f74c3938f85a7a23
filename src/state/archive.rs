//! Archive of saved blocks
//!
//! Saved blocks have no owner and no expiry. Reading a block never
//! consumes it, so one block can be posted any number of times.

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use crate::models::Post;
use crate::utils::helpers::generate_random_string;

/// Length of generated block ids
pub const BLOCK_ID_LENGTH: usize = 8;

/// A finished post kept for later reposting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedBlock {
    pub id: String,
    pub post: Post,
    pub saved_by: i64,
    pub saved_at: DateTime<Utc>,
}

/// Keyed store of archived blocks
#[async_trait]
pub trait BlockArchive: Send + Sync {
    /// Store `post` under a freshly generated id and return the entry
    async fn insert(&self, post: Post, saved_by: i64) -> ArchivedBlock;

    /// Look up a block without consuming it
    async fn get(&self, block_id: &str) -> Option<ArchivedBlock>;

    /// Number of archived blocks
    async fn len(&self) -> usize;
}

/// `BlockArchive` backed by a `HashMap` behind a tokio `RwLock`
#[derive(Debug, Default)]
pub struct InMemoryBlockArchive {
    blocks: RwLock<HashMap<String, ArchivedBlock>>,
}

impl InMemoryBlockArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlockArchive for InMemoryBlockArchive {
    async fn insert(&self, post: Post, saved_by: i64) -> ArchivedBlock {
        let mut blocks = self.blocks.write().await;

        let id = loop {
            let candidate = generate_random_string(BLOCK_ID_LENGTH);
            if !blocks.contains_key(&candidate) {
                break candidate;
            }
        };

        let block = ArchivedBlock {
            id: id.clone(),
            post,
            saved_by,
            saved_at: Utc::now(),
        };
        blocks.insert(id.clone(), block.clone());
        debug!(block_id = %id, saved_by = saved_by, total = blocks.len(), "Block archived");

        block
    }

    async fn get(&self, block_id: &str) -> Option<ArchivedBlock> {
        self.blocks.read().await.get(block_id).cloned()
    }

    async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }
}
