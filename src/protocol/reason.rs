//! Connection teardown reasons.
//!
//! The transport classifies every teardown into one [`TeardownReason`],
//! which is passed through to the router as the `closed` payload:
//!
//! ```json
//! { "reason": { "kind": "remote_close_with_code", "code": 4000, "reason": "bye" } }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::io::ErrorKind;

use serde::Serialize;
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;

// ============================================================================
// TeardownReason
// ============================================================================

/// Why a connection ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeardownReason {
    /// Orderly shutdown requested on the server side.
    Shutdown,
    /// Idle timeout elapsed.
    Timeout,
    /// Peer closed cleanly without a status.
    RemoteClose,
    /// Peer closed with a status code and reason.
    RemoteCloseWithCode {
        /// Close code sent by the peer.
        code: u16,
        /// Reason sent by the peer.
        reason: String,
    },
    /// Transport failure.
    Error {
        /// Failure class.
        fault: TransportFault,
    },
}

/// Class of transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFault {
    /// Text frame was not valid UTF-8.
    BadEncoding,
    /// Frame violated the WebSocket protocol or size limits.
    BadFrame,
    /// Connection dropped without a closing handshake.
    AbruptClose,
}

impl TeardownReason {
    /// Creates a transport error reason.
    #[inline]
    #[must_use]
    pub const fn error(fault: TransportFault) -> Self {
        Self::Error { fault }
    }

    /// Classifies a received close frame.
    #[must_use]
    pub fn from_close(frame: Option<CloseFrame>) -> Self {
        match frame {
            Some(frame) => Self::RemoteCloseWithCode {
                code: u16::from(frame.code),
                reason: frame.reason.as_str().to_owned(),
            },
            None => Self::RemoteClose,
        }
    }

    /// Classifies a WebSocket read or write error.
    #[must_use]
    pub fn from_ws_error(err: &WsError) -> Self {
        match err {
            WsError::ConnectionClosed | WsError::AlreadyClosed => Self::RemoteClose,
            WsError::Utf8(_) => Self::error(TransportFault::BadEncoding),
            WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
                Self::error(TransportFault::AbruptClose)
            }
            WsError::Protocol(_) | WsError::Capacity(_) => Self::error(TransportFault::BadFrame),
            WsError::Io(e) if e.kind() == ErrorKind::TimedOut => Self::Timeout,
            _ => Self::error(TransportFault::AbruptClose),
        }
    }

    /// Returns the `closed` event payload for this reason.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({ "reason": self })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Error as IoError;

    use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

    #[test]
    fn test_from_close_with_code() {
        let frame = CloseFrame {
            code: CloseCode::from(4000),
            reason: "bye".into(),
        };
        assert_eq!(
            TeardownReason::from_close(Some(frame)),
            TeardownReason::RemoteCloseWithCode {
                code: 4000,
                reason: "bye".into()
            }
        );
    }

    #[test]
    fn test_from_close_without_code() {
        assert_eq!(TeardownReason::from_close(None), TeardownReason::RemoteClose);
    }

    #[test]
    fn test_from_ws_error() {
        let reset = WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake);
        let io = WsError::Io(IoError::new(ErrorKind::ConnectionReset, "reset"));

        assert_eq!(
            TeardownReason::from_ws_error(&reset),
            TeardownReason::error(TransportFault::AbruptClose)
        );
        assert_eq!(
            TeardownReason::from_ws_error(&io),
            TeardownReason::error(TransportFault::AbruptClose)
        );
        assert_eq!(
            TeardownReason::from_ws_error(&WsError::ConnectionClosed),
            TeardownReason::RemoteClose
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = TeardownReason::error(TransportFault::AbruptClose).to_payload();
        assert_eq!(
            payload,
            json!({"reason": {"kind": "error", "fault": "abrupt_close"}})
        );

        let payload = TeardownReason::Shutdown.to_payload();
        assert_eq!(payload, json!({"reason": {"kind": "shutdown"}}));
    }
}
