//! Registry of live sockets.
//!
//! Keeps one [`SocketHandle`] per running connection, keyed by [`SocketId`].
//! Entries are added when an endpoint starts serving a stream and removed
//! when that connection's event loop finishes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           SocketRegistry                │
//! │  ┌─────────────────────────────────┐    │
//! │  │ SocketId=a1… → SocketHandle     │    │
//! │  │ SocketId=b7… → SocketHandle     │    │
//! │  │ SocketId=c3… → SocketHandle     │    │
//! │  └─────────────────────────────────┘    │
//! └─────────────────────────────────────────┘
//! ```

// ============================================================================
// Imports
// ============================================================================

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::identifiers::SocketId;
use crate::socket::SocketHandle;

// ============================================================================
// SocketRegistry
// ============================================================================

/// Thread-safe map of live sockets.
#[derive(Debug, Default)]
pub struct SocketRegistry {
    /// Live sockets by ID.
    sockets: RwLock<FxHashMap<SocketId, SocketHandle>>,
}

// ============================================================================
// SocketRegistry - Membership
// ============================================================================

impl SocketRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live socket.
    pub fn insert(&self, handle: SocketHandle) {
        let id = handle.id();
        self.sockets.write().insert(id, handle);
        debug!(socket_id = %id, "Socket registered");
    }

    /// Unregisters a socket.
    ///
    /// Returns the handle if the socket was registered.
    pub fn remove(&self, id: SocketId) -> Option<SocketHandle> {
        let removed = self.sockets.write().remove(&id);
        if removed.is_some() {
            debug!(socket_id = %id, "Socket unregistered");
        }
        removed
    }

    /// Returns the handle for a socket.
    #[must_use]
    pub fn get(&self, id: SocketId) -> Option<SocketHandle> {
        self.sockets.read().get(&id).cloned()
    }

    /// Returns the number of live sockets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sockets.read().len()
    }

    /// Returns `true` if no socket is live.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sockets.read().is_empty()
    }

    /// Returns the IDs of all live sockets.
    #[must_use]
    pub fn ids(&self) -> Vec<SocketId> {
        self.sockets.read().keys().copied().collect()
    }
}

// ============================================================================
// SocketRegistry - Fan-out
// ============================================================================

impl SocketRegistry {
    /// Sends `data` as an `info` instruction to every live socket.
    ///
    /// Returns the number of sockets addressed.
    pub fn broadcast_info(&self, data: &Value) -> usize {
        let handles = self.handles();
        for handle in &handles {
            handle.info(data.clone());
        }
        handles.len()
    }

    /// Sends `terminate` to every live socket.
    ///
    /// Sockets unregister themselves once their teardown completes.
    ///
    /// Returns the number of sockets addressed.
    pub fn terminate_all(&self) -> usize {
        let handles = self.handles();
        for handle in &handles {
            handle.terminate();
        }
        handles.len()
    }

    /// Snapshot of all handles, taken without holding the lock while sending.
    fn handles(&self) -> Vec<SocketHandle> {
        self.sockets.read().values().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
