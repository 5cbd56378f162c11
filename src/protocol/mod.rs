//! Wire protocol types.
//!
//! # Protocol Overview
//!
//! | Type | Direction | Purpose |
//! |------|-----------|---------|
//! | [`Message`] | Client → Server | Envelope addressed to a topic |
//! | [`Frame`] | Server → Client | Reply written verbatim to the transport |
//! | [`TeardownReason`] | Transport → Router | Payload of the `closed` event |
//!
//! # Event Names
//!
//! `join` and `leave` are control verbs. `closed` and `info` are produced
//! only by the server. Everything else is an application event.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event` | Event vocabulary |
//! | `frame` | Outbound frames and reply options |
//! | `message` | Envelope codec |
//! | `reason` | Teardown classification |

// ============================================================================
// Submodules
// ============================================================================

/// Event vocabulary.
pub mod event;

/// Outbound frames and reply options.
pub mod frame;

/// Envelope codec.
pub mod message;

/// Teardown classification.
pub mod reason;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::Event;
pub use frame::{CloseStatus, Frame, ReplyOptions};
pub use message::Message;
pub use reason::{TeardownReason, TransportFault};
