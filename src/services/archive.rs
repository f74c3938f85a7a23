//! Block archive service
//!
//! Saves finished blocks under a short id and re-posts them on demand.

use std::sync::Arc;
use crate::models::DeliveryTarget;
use crate::services::conversation::finished_post_of;
use crate::services::router::delivery_error;
use crate::services::transport::PostTransport;
use crate::state::{ArchivedBlock, BlockArchive, SessionStore};
use crate::utils::errors::{LessonRelayError, Result};
use crate::utils::logging::log_block_event;

pub struct ArchiveService {
    archive: Arc<dyn BlockArchive>,
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn PostTransport>,
}

impl ArchiveService {
    pub fn new(
        archive: Arc<dyn BlockArchive>,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn PostTransport>,
    ) -> Self {
        Self {
            archive,
            store,
            transport,
        }
    }

    /// Archive the owner's finished post and close the session
    pub async fn save(&self, owner_id: i64) -> Result<ArchivedBlock> {
        let session = self
            .store
            .load(owner_id)
            .await
            .ok_or(LessonRelayError::NoActiveBlock { user_id: owner_id })?;
        let post = finished_post_of(&session)?;

        let block = self.archive.insert(post, owner_id).await;
        self.store.remove(owner_id).await;
        log_block_event(owner_id, "archived", Some(&block.id));

        Ok(block)
    }

    /// Look up an archived block
    pub async fn get(&self, block_id: &str) -> Result<ArchivedBlock> {
        self.archive
            .get(block_id)
            .await
            .ok_or_else(|| LessonRelayError::BlockNotFound { block_id: block_id.to_string() })
    }

    /// Send an archived block to `target`. The block stays in the archive,
    /// so the same id can be posted any number of times.
    pub async fn post_by_id(&self, block_id: &str, target: DeliveryTarget) -> Result<i32> {
        let block = self.get(block_id).await?;

        self.transport
            .deliver(&target, &block.post)
            .await
            .map_err(|e| delivery_error(&format!("chat {}", target.chat_id), e))
    }
}
