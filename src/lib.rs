//! chanmux - Topic multiplexing over a single WebSocket connection.
//!
//! Many logical channels (topics) share one physical connection. Each
//! connection joins and leaves topics, and every event it sends is gated on
//! membership before an application router sees it.
//!
//! # Architecture
//!
//! ```text
//! frame ─► Message::parse ─► Socket::handle_message ─► Router::route
//!                                  │                        │
//!                                  ◄── join/leave outcome ──┘
//!
//! SocketHandle ─► Instruction queue ─► owning task ─► transport write
//! ```
//!
//! Key design principles:
//!
//! - One tokio task per connection owns the [`Socket`] and the write half
//! - `join` always reaches the router; everything else requires membership
//! - Router rejections and unauthorized events never close the connection
//! - Teardown sends one `closed` event per joined topic
//!
//! # Quick Start
//!
//! ```no_run
//! use chanmux::{Endpoint, Event, Result, Route, RouteError, RouteResult, Router, Socket};
//!
//! struct Rooms;
//!
//! #[async_trait::async_trait]
//! impl Router for Rooms {
//!     async fn route(&self, _socket: &mut Socket, route: Route) -> RouteResult {
//!         match route.event {
//!             Event::Join if !route.topic.as_str().starts_with("room:") => {
//!                 Err(RouteError::new("unknown topic"))
//!             }
//!             _ => Ok(()),
//!         }
//!     }
//! }
//!
//! # async fn example(stream: tokio::net::TcpStream) -> Result<()> {
//! let endpoint = Endpoint::builder().router(Rooms).build()?;
//!
//! let ws_stream = tokio_tungstenite::accept_async(stream).await?;
//! let handle = endpoint.serve(ws_stream);
//! handle.closed().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`endpoint`] | Endpoint factory and configuration |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Envelope, frames, teardown reasons |
//! | [`router`] | Router contract |
//! | [`socket`] | Socket state, dispatch, signaling |
//! | [`transport`] | Connection event loop and registry |

// ============================================================================
// Modules
// ============================================================================

/// Endpoint factory and configuration.
///
/// Use [`Endpoint::builder()`] to create a configured endpoint.
pub mod endpoint;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Wire protocol types.
pub mod protocol;

/// Router contract.
pub mod router;

/// Socket state machine.
///
/// - [`Socket`] - Per-connection state and dispatcher
/// - [`SocketHandle`] - Outbound instruction sender
pub mod socket;

/// WebSocket transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Endpoint types
pub use endpoint::{Endpoint, EndpointBuilder, SocketOptions};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{SocketId, Topic};

// Protocol types
pub use protocol::{
    CloseStatus, Event, Frame, Message, ReplyOptions, TeardownReason, TransportFault,
};

// Router types
pub use router::{Route, RouteError, RouteResult, Router};

// Socket types
pub use socket::{Instruction, Socket, SocketHandle};
