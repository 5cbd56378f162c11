//! Teardown notifications.
//!
//! When a connection ends, for whatever reason, the router gets one `closed`
//! event per joined topic so it can clean up per-channel state. Delivery is
//! best effort and unordered. Closing consumes the [`Socket`], so nothing can
//! be dispatched afterwards.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use crate::identifiers::Topic;
use crate::protocol::{Event, TeardownReason};

use super::Socket;

// ============================================================================
// Socket - Lifecycle
// ============================================================================

impl Socket {
    /// Notifies every joined topic that the connection closed, then discards
    /// the socket.
    ///
    /// Each topic receives exactly one `closed` event carrying
    /// `{"reason": reason}`. Router rejections are logged and ignored.
    ///
    /// Returns the number of topics notified.
    pub async fn close(mut self, reason: TeardownReason) -> usize {
        let topics: Vec<Topic> = self.joined.iter().cloned().collect();
        let payload = reason.to_payload();

        for topic in &topics {
            if let Err(e) = self.route(topic.clone(), Event::Closed, payload.clone()).await {
                warn!(
                    socket_id = %self.id(),
                    topic = %topic,
                    reason = %e,
                    "Closed notification rejected by router"
                );
            }
        }

        debug!(
            socket_id = %self.id(),
            topics = topics.len(),
            ?reason,
            "Socket closed"
        );

        topics.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
