//! WebSocket transport layer.
//!
//! This module binds sockets to upgraded WebSocket streams and keeps track
//! of the connections that are running.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Client         │         WebSocket            │  Connection     │
//! │                 │◄────────────────────────────►│  (tokio task)   │
//! │  join / leave / │      text frames             │  Socket         │
//! │  events         │                              │  + Router       │
//! └─────────────────┘                              └─────────────────┘
//!                                                          ▲
//!                                                          │ Instruction
//!                                                  ┌───────┴─────────┐
//!                                                  │  SocketHandle   │
//!                                                  │  (any task)     │
//!                                                  └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. The caller upgrades a stream to WebSocket (outside this crate)
//! 2. `Endpoint::serve` creates a `Socket` and registers its handle
//! 3. `Connection::run` dispatches frames and instructions
//! 4. Teardown: `closed` to every joined topic, then unregister
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Per-connection event loop |
//! | `registry` | Live socket registry |

// ============================================================================
// Submodules
// ============================================================================

/// Per-connection event loop.
pub mod connection;

/// Live socket registry.
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use registry::SocketRegistry;
