//! Endpoint implementation.
//!
//! An [`Endpoint`] binds a router and socket options together and turns
//! upgraded WebSocket streams into running sockets.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::WebSocketStream;
use tracing::{debug, error, info};

use crate::identifiers::SocketId;
use crate::router::Router;
use crate::socket::{Socket, SocketHandle};
use crate::transport::{Connection, SocketRegistry};

use super::builder::EndpointBuilder;
use super::options::SocketOptions;

// ============================================================================
// Endpoint
// ============================================================================

/// Factory for sockets sharing one router.
///
/// Cheap to clone; clones share the router, options and registry.
#[derive(Clone)]
pub struct Endpoint {
    inner: Arc<EndpointInner>,
}

/// Shared endpoint state.
struct EndpointInner {
    /// Router for every socket.
    router: Arc<dyn Router>,
    /// Options for every socket.
    options: Arc<SocketOptions>,
    /// Live sockets.
    registry: SocketRegistry,
}

// ============================================================================
// Endpoint - Constructor
// ============================================================================

impl Endpoint {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::new()
    }

    /// Creates an endpoint from validated parts.
    pub(crate) fn new(router: Arc<dyn Router>, options: SocketOptions) -> Self {
        Self {
            inner: Arc::new(EndpointInner {
                router,
                options: Arc::new(options),
                registry: SocketRegistry::new(),
            }),
        }
    }
}

// ============================================================================
// Endpoint - Public API
// ============================================================================

impl Endpoint {
    /// Starts serving an upgraded WebSocket stream.
    ///
    /// Spawns the connection's owning task and returns the handle of its
    /// socket. The socket leaves the registry when that task ends, whether
    /// it returned or panicked. Must be called from within a tokio runtime.
    pub fn serve<S>(&self, ws_stream: WebSocketStream<S>) -> SocketHandle
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let (socket, instructions) = Socket::new(
            Arc::clone(&self.inner.router),
            Arc::clone(&self.inner.options),
        );
        let handle = socket.handle().clone();
        let connection = Connection::new(
            ws_stream,
            socket,
            instructions,
            self.inner.options.idle_timeout,
        );
        let socket_id = connection.id();

        self.inner.registry.insert(handle.clone());

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(connection.run());
        tokio::spawn(async move {
            match task.await {
                Ok(reason) => debug!(%socket_id, ?reason, "Connection finished"),
                Err(e) => error!(%socket_id, error = %e, "Connection task failed"),
            }
            inner.registry.remove(socket_id);
        });

        debug!(%socket_id, "Serving connection");
        handle
    }

    /// Returns the handle of a live socket.
    #[inline]
    #[must_use]
    pub fn socket(&self, id: SocketId) -> Option<SocketHandle> {
        self.inner.registry.get(id)
    }

    /// Returns the number of live sockets.
    #[inline]
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns the shared socket options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &SocketOptions {
        &self.inner.options
    }

    /// Delivers `data` as `info` to every joined topic of every live socket.
    ///
    /// Returns the number of sockets addressed.
    pub fn broadcast_info(&self, data: Value) -> usize {
        let count = self.inner.registry.broadcast_info(&data);
        debug!(sockets = count, "Info broadcast");
        count
    }

    /// Terminates every live socket.
    ///
    /// Returns the number of sockets addressed. Each socket notifies its
    /// joined topics before it unregisters.
    pub fn shutdown(&self) -> usize {
        let count = self.inner.registry.terminate_all();
        info!(sockets = count, "Endpoint shutting down");
        count
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("options", &self.inner.options)
            .field("connections", &self.inner.registry.len())
            .finish_non_exhaustive()
    }
}
