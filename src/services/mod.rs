//! Services module
//!
//! This module contains business logic services

pub mod archive;
pub mod conversation;
pub mod formatter;
pub mod health;
pub mod link;
pub mod router;
pub mod transport;

// Re-export commonly used services
pub use archive::ArchiveService;
pub use conversation::{ConversationController, SKIP_TOKEN};
pub use formatter::PostFormatter;
pub use link::{LessonLink, LinkExtractor};
pub use router::{Delivery, DestinationRouter};
pub use transport::{post_keyboard, MemoryTransport, PostTransport, TelegramTransport};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::state::{BlockArchive, InMemoryBlockArchive, InMemorySessionStore, SessionStore};
use crate::utils::errors::Result;

/// Service factory for creating and sharing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub settings: Arc<Settings>,
    pub links: Arc<LinkExtractor>,
    pub conversation: Arc<ConversationController>,
    pub router: Arc<DestinationRouter>,
    pub archive: Arc<ArchiveService>,
    pub transport: Arc<dyn PostTransport>,
}

impl ServiceFactory {
    /// Create all services over fresh in-memory stores
    pub fn new(settings: Settings, transport: Arc<dyn PostTransport>) -> Result<Self> {
        Self::with_stores(
            settings,
            transport,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryBlockArchive::new()),
        )
    }

    /// Create all services over the given stores
    pub fn with_stores(
        settings: Settings,
        transport: Arc<dyn PostTransport>,
        sessions: Arc<dyn SessionStore>,
        blocks: Arc<dyn BlockArchive>,
    ) -> Result<Self> {
        let links = LinkExtractor::new(settings.links.clone())?;
        let formatter = PostFormatter::new(settings.post.clone());
        let conversation = ConversationController::new(sessions.clone(), formatter);
        let router = DestinationRouter::new(settings.destinations.clone(), sessions.clone(), transport.clone());
        let archive = ArchiveService::new(blocks, sessions, transport.clone());

        Ok(Self {
            settings: Arc::new(settings),
            links: Arc::new(links),
            conversation: Arc::new(conversation),
            router: Arc::new(router),
            archive: Arc::new(archive),
            transport,
        })
    }
}
