//! Destination routing
//!
//! Resolves a configured destination by name and sends the owner's finished
//! post there. A successful delivery consumes the session; a failed one
//! keeps it so the admin can fix the destination and press the button again.

use std::sync::Arc;
use crate::models::{Destination, Field};
use crate::services::transport::PostTransport;
use crate::state::SessionStore;
use crate::utils::errors::{DeliveryFailure, LessonRelayError, Result};
use crate::utils::logging::log_delivery;

/// Outcome of a successful delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub destination: String,
    pub chat_id: i64,
    pub message_id: i32,
}

/// Routes finished posts to named destinations
pub struct DestinationRouter {
    destinations: Vec<Destination>,
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn PostTransport>,
}

impl DestinationRouter {
    pub fn new(
        destinations: Vec<Destination>,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn PostTransport>,
    ) -> Self {
        Self {
            destinations,
            store,
            transport,
        }
    }

    /// Configured destinations, in configuration order
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Find a destination by its display name
    pub fn lookup(&self, name: &str) -> Result<&Destination> {
        self.destinations
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| LessonRelayError::UnknownDestination { name: name.to_string() })
    }

    /// Send the owner's finished post to the destination called `name`
    pub async fn route(&self, owner_id: i64, name: &str) -> Result<Delivery> {
        let destination = self.lookup(name)?;

        let session = self
            .store
            .load(owner_id)
            .await
            .ok_or(LessonRelayError::NoActiveBlock { user_id: owner_id })?;
        let post = session.post().ok_or_else(|| LessonRelayError::BlockIncomplete {
            user_id: owner_id,
            awaiting: session.awaiting().unwrap_or(Field::Title),
        })?;

        let target = destination.target();
        match self.transport.deliver(&target, post).await {
            Ok(message_id) => {
                self.store.remove(owner_id).await;
                log_delivery(owner_id, &destination.name, target.chat_id, target.thread_id, true);
                Ok(Delivery {
                    destination: destination.name.clone(),
                    chat_id: target.chat_id,
                    message_id,
                })
            }
            Err(e) => {
                log_delivery(owner_id, &destination.name, target.chat_id, target.thread_id, false);
                Err(delivery_error(&destination.name, e))
            }
        }
    }
}

/// Wrap a transport error with a diagnosis of what to check
pub(crate) fn delivery_error(destination: &str, error: LessonRelayError) -> LessonRelayError {
    let detail = error.to_string();
    LessonRelayError::TransportDelivery {
        destination: destination.to_string(),
        failure: DeliveryFailure::classify(&detail),
        detail,
    }
}
