//! Outbound frames and reply options.
//!
//! A [`Frame`] is handed to the transport write path verbatim. Close codes
//! and payload sizes are the transport's business and are not validated here.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Map, Value};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

// ============================================================================
// Frame
// ============================================================================

/// A frame to write to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text frame.
    Text(String),
    /// Binary frame.
    Binary(Vec<u8>),
    /// Ping control frame.
    Ping(Vec<u8>),
    /// Pong control frame.
    Pong(Vec<u8>),
    /// Close control frame with optional status.
    Close(Option<CloseStatus>),
}

impl Frame {
    /// Creates a text frame.
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a close frame with a status code and reason.
    #[inline]
    #[must_use]
    pub fn close(code: u16, reason: impl Into<String>) -> Self {
        Self::Close(Some(CloseStatus {
            code,
            reason: reason.into(),
        }))
    }

    /// Returns `true` for close frames.
    #[inline]
    #[must_use]
    pub fn is_close(&self) -> bool {
        matches!(self, Self::Close(_))
    }
}

impl From<Frame> for WsMessage {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Text(text) => WsMessage::Text(text.into()),
            Frame::Binary(data) => WsMessage::Binary(data.into()),
            Frame::Ping(data) => WsMessage::Ping(data.into()),
            Frame::Pong(data) => WsMessage::Pong(data.into()),
            Frame::Close(status) => WsMessage::Close(status.map(|status| CloseFrame {
                code: CloseCode::from(status.code),
                reason: status.reason.into(),
            })),
        }
    }
}

// ============================================================================
// CloseStatus
// ============================================================================

/// Status carried by a close frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseStatus {
    /// Close code, e.g. 1000.
    pub code: u16,
    /// Human-readable reason.
    pub reason: String,
}

// ============================================================================
// ReplyOptions
// ============================================================================

/// Options applied by the owning task after a reply is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyOptions {
    /// Replacement for the socket's assigns.
    pub state: Option<Map<String, Value>>,

    /// Hibernate once the frame is written.
    pub hibernate: bool,
}

impl ReplyOptions {
    /// Creates empty options.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: None,
            hibernate: false,
        }
    }

    /// Sets the replacement assigns.
    #[inline]
    #[must_use]
    pub fn with_state(mut self, state: Map<String, Value>) -> Self {
        self.state = Some(state);
        self
    }

    /// Requests hibernation after the write.
    #[inline]
    #[must_use]
    pub fn with_hibernate(mut self) -> Self {
        self.hibernate = true;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
