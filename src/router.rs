//! Router contract.
//!
//! The router maps `(topic, event)` to application logic. It is the only
//! place business rules live; the socket layer just gates access to it and
//! folds its outcome into channel membership.
//!
//! # Contract
//!
//! - Called with the socket's owning task as the only caller for that
//!   socket, but concurrently across sockets: implementations must be
//!   `Send + Sync`.
//! - Returns `Ok(())` to accept, or [`RouteError`] to reject. On `join`,
//!   acceptance is what grants membership.
//! - May mutate [`Socket::assigns_mut`] and may reply through
//!   [`Socket::handle`]. It cannot change membership.
//! - Should not block indefinitely; no timeout is imposed.
//!
//! # Example
//!
//! ```ignore
//! use chanmux::{Event, Frame, Route, RouteError, RouteResult, Router, Socket};
//!
//! struct Rooms;
//!
//! #[async_trait::async_trait]
//! impl Router for Rooms {
//!     async fn route(&self, socket: &mut Socket, route: Route) -> RouteResult {
//!         match route.event {
//!             Event::Join if route.topic.as_str().starts_with("room:") => Ok(()),
//!             Event::Join => Err(RouteError::new("unknown room")),
//!             _ => Ok(()),
//!         }
//!     }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::identifiers::Topic;
use crate::protocol::Event;
use crate::socket::Socket;

// ============================================================================
// Types
// ============================================================================

/// Outcome of a routing call.
pub type RouteResult = StdResult<(), RouteError>;

// ============================================================================
// Route
// ============================================================================

/// A single routing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Transport protocol name, `"websocket"` unless configured otherwise.
    pub protocol: Arc<str>,

    /// Target channel.
    pub topic: Topic,

    /// Event name, passed through unchanged from the client.
    pub event: Event,

    /// Opaque payload.
    pub payload: Value,
}

// ============================================================================
// RouteError
// ============================================================================

/// Rejection returned by a router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct RouteError {
    /// Why the router rejected the event.
    pub reason: String,
}

impl RouteError {
    /// Creates a rejection.
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Application router consumed by every socket of an endpoint.
#[async_trait]
pub trait Router: Send + Sync + 'static {
    /// Handles one routed event.
    async fn route(&self, socket: &mut Socket, route: Route) -> RouteResult;
}

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    use parking_lot::Mutex;
    use rustc_hash::FxHashSet;

    /// One observed router call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Call {
        pub topic: String,
        pub event: String,
        pub payload: Value,
    }

    /// Router that records calls and rejects configured `(topic, event)` pairs.
    #[derive(Default)]
    pub(crate) struct RecordingRouter {
        calls: Mutex<Vec<Call>>,
        rejected: Mutex<FxHashSet<(String, String)>>,
        panics: Mutex<FxHashSet<String>>,
        echo: bool,
    }

    impl RecordingRouter {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Router that replies with the routed envelope on application events.
        pub(crate) fn echoing() -> Arc<Self> {
            Arc::new(Self {
                echo: true,
                ..Self::default()
            })
        }

        pub(crate) fn reject(&self, topic: &str, event: &str) {
            self.rejected
                .lock()
                .insert((topic.to_owned(), event.to_owned()));
        }

        pub(crate) fn panic_on(&self, event: &str) {
            self.panics.lock().insert(event.to_owned());
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        pub(crate) fn calls_for(&self, event: &str) -> Vec<Call> {
            self.calls
                .lock()
                .iter()
                .filter(|call| call.event == event)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl Router for RecordingRouter {
        async fn route(&self, socket: &mut Socket, route: Route) -> RouteResult {
            let topic = route.topic.as_str().to_owned();
            let event = route.event.as_str().to_owned();

            self.calls.lock().push(Call {
                topic: topic.clone(),
                event: event.clone(),
                payload: route.payload.clone(),
            });

            if self.panics.lock().contains(&event) {
                panic!("explode on {event}");
            }

            if self.rejected.lock().contains(&(topic, event)) {
                return Err(RouteError::new("rejected"));
            }

            if self.echo && matches!(route.event, Event::Custom(_)) {
                let message =
                    crate::protocol::Message::new(route.topic, route.event, route.payload);
                if let Ok(frame) = message.to_frame() {
                    socket.handle().reply(frame);
                }
            }

            Ok(())
        }
    }
}
