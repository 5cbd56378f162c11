//! Per-connection socket state.
//!
//! A [`Socket`] exists once per physical connection and is owned by that
//! connection's task. Nothing else holds a reference to it; other tasks talk
//! to it through its [`SocketHandle`].
//!
//! # Channel States
//!
//! ```text
//!             join (Ok)               leave (Ok) / teardown
//! Unjoined ─────────────► Joined ─────────────────────────► Unjoined
//! ```
//!
//! Membership lives in a set: joining twice is idempotent, leaving an
//! unjoined topic is a no-op. Only the dispatcher changes it.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `dispatch` | Inbound message state machine |
//! | `lifecycle` | Teardown notifications |
//! | `signal` | Outbound instructions and [`SocketHandle`] |

// ============================================================================
// Submodules
// ============================================================================

/// Inbound message state machine.
pub mod dispatch;

/// Teardown notifications.
pub mod lifecycle;

/// Outbound instructions.
pub mod signal;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::trace;

use crate::endpoint::SocketOptions;
use crate::identifiers::{SocketId, Topic};
use crate::router::Router;

// ============================================================================
// Re-exports
// ============================================================================

pub use signal::{Instruction, SocketHandle};

// ============================================================================
// Socket
// ============================================================================

/// State of one connection.
pub struct Socket {
    /// Handle to the owning task, also the path to the transport writer.
    handle: SocketHandle,

    /// Router shared by all sockets of the endpoint.
    router: Arc<dyn Router>,

    /// Shared endpoint options.
    options: Arc<SocketOptions>,

    /// Topics this connection is authorized on.
    joined: FxHashSet<Topic>,

    /// Router-owned state.
    assigns: Map<String, Value>,
}

impl Socket {
    /// Creates a socket with no joined topics.
    ///
    /// Returns the receiver the owning task must drain. Endpoints call this
    /// for every served stream; it can also drive a router directly without
    /// a transport.
    pub fn new(
        router: Arc<dyn Router>,
        options: Arc<SocketOptions>,
    ) -> (Self, mpsc::UnboundedReceiver<Instruction>) {
        let (handle, instructions) = SocketHandle::channel(SocketId::generate());

        let socket = Self {
            handle,
            router,
            options,
            joined: FxHashSet::default(),
            assigns: Map::new(),
        };

        (socket, instructions)
    }

    /// Returns the socket ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SocketId {
        self.handle.id()
    }

    /// Returns the handle for outbound instructions.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &SocketHandle {
        &self.handle
    }

    /// Returns the protocol name given to the router.
    #[inline]
    #[must_use]
    pub fn protocol(&self) -> &str {
        &self.options.protocol
    }

    /// Returns `true` if the socket has joined `topic`.
    #[inline]
    #[must_use]
    pub fn authorized(&self, topic: &str) -> bool {
        self.joined.contains(topic)
    }

    /// Returns the joined topics, in no particular order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.joined.iter()
    }

    /// Returns the number of joined topics.
    #[inline]
    #[must_use]
    pub fn joined_count(&self) -> usize {
        self.joined.len()
    }

    /// Returns the router-owned state.
    #[inline]
    #[must_use]
    pub fn assigns(&self) -> &Map<String, Value> {
        &self.assigns
    }

    /// Returns the router-owned state for mutation.
    #[inline]
    pub fn assigns_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.assigns
    }

    /// Sets one assign.
    #[inline]
    pub fn assign(&mut self, key: impl Into<String>, value: Value) {
        self.assigns.insert(key.into(), value);
    }

    /// Replaces all assigns, as requested by a reply's `state` option.
    pub(crate) fn replace_assigns(&mut self, state: Map<String, Value>) {
        self.assigns = state;
    }

    /// Releases spare capacity while the connection is idle.
    pub(crate) fn hibernate(&mut self) {
        self.joined.shrink_to_fit();
        trace!(socket_id = %self.id(), topics = self.joined.len(), "Socket hibernating");
    }
}

impl std::fmt::Debug for Socket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Socket")
            .field("id", &self.id())
            .field("joined", &self.joined)
            .field("assigns", &self.assigns)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::router::testing::RecordingRouter;

    fn socket() -> Socket {
        let (socket, _rx) = Socket::new(RecordingRouter::new(), Arc::new(SocketOptions::new()));
        socket
    }

    #[test]
    fn test_new_socket_is_empty() {
        let socket = socket();
        assert_eq!(socket.joined_count(), 0);
        assert!(!socket.authorized("room:1"));
        assert!(socket.assigns().is_empty());
        assert_eq!(socket.protocol(), "websocket");
    }

    #[test]
    fn test_handle_shares_id() {
        let socket = socket();
        assert_eq!(socket.handle().id(), socket.id());
    }

    #[test]
    fn test_assigns() {
        let mut socket = socket();
        socket.assign("user", json!("alice"));
        assert_eq!(socket.assigns().get("user"), Some(&json!("alice")));

        let mut state = Map::new();
        state.insert("user".into(), json!("bob"));
        socket.replace_assigns(state);
        assert_eq!(socket.assigns().get("user"), Some(&json!("bob")));
    }
}
