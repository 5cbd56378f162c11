//! Error types for chanmux.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use chanmux::{Error, Result};
//!
//! async fn example(socket: &mut Socket, text: &str) -> Result<()> {
//!     socket.handle_text(text).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants | Effect |
//! |----------|----------|--------|
//! | Configuration | [`Error::Config`] | Endpoint is not built |
//! | Per-message | [`Error::Parse`], [`Error::Unauthorized`], [`Error::Router`] | Frame dropped, connection stays open |
//! | External | [`Error::Json`], [`Error::WebSocket`] | Wrapped collaborator errors |
//!
//! Transport failures that end a connection are not errors here; the event
//! loop classifies them as a [`TeardownReason`](crate::TeardownReason).

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::identifiers::Topic;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned by [`EndpointBuilder::build`](crate::EndpointBuilder::build)
    /// when the configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Per-message Errors
    // ========================================================================
    /// Inbound frame is not a valid envelope.
    ///
    /// The frame is dropped before reaching the router.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the structural violation.
        message: String,
    },

    /// Event targets a topic the socket has not joined.
    ///
    /// The router is never invoked for this message.
    #[error("Unauthorized event '{event}' on topic '{topic}'")]
    Unauthorized {
        /// Topic the event was addressed to.
        topic: Topic,
        /// Event name as received.
        event: String,
    },

    /// Router returned an error outcome.
    ///
    /// Membership is left unchanged.
    #[error("Router rejected '{event}' on topic '{topic}': {reason}")]
    Router {
        /// Topic the event was addressed to.
        topic: Topic,
        /// Event name as routed.
        event: String,
        /// Reason given by the router.
        reason: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[inline]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    #[inline]
    pub fn unauthorized(topic: Topic, event: impl Into<String>) -> Self {
        Self::Unauthorized {
            topic,
            event: event.into(),
        }
    }

    /// Creates a router error.
    #[inline]
    pub fn router(topic: Topic, event: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Router {
            topic,
            event: event.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error only affects the message that caused it.
    ///
    /// Per-message errors never terminate the connection.
    #[inline]
    #[must_use]
    pub fn is_per_message(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Unauthorized { .. } | Self::Router { .. }
        )
    }

    /// Returns `true` if this is a parse error.
    #[inline]
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` if this is an unauthorized error.
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
