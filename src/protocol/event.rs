//! Event vocabulary.
//!
//! Events are plain strings on the wire. A few names are reserved control
//! verbs that the dispatcher treats specially:
//!
//! | Name | Origin | Meaning |
//! |------|--------|---------|
//! | `join` | Client | Establish authorization on a topic |
//! | `leave` | Client | Revoke authorization on a topic |
//! | `closed` | Internal | Connection teardown notification |
//! | `info` | Internal | Out-of-band delivery from another task |
//!
//! Every other name is an application event and passes through unchanged.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Wire name of the join verb.
pub const JOIN: &str = "join";

/// Wire name of the leave verb.
pub const LEAVE: &str = "leave";

/// Wire name of the teardown notification.
pub const CLOSED: &str = "closed";

/// Wire name of out-of-band info delivery.
pub const INFO: &str = "info";

// ============================================================================
// Event
// ============================================================================

/// An event name, with reserved verbs split out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Event {
    /// `join` control verb.
    Join,
    /// `leave` control verb.
    Leave,
    /// Internal teardown notification.
    Closed,
    /// Internal out-of-band delivery.
    Info,
    /// Application-defined event name.
    Custom(String),
}

impl Event {
    /// Returns the wire name of this event.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Join => JOIN,
            Self::Leave => LEAVE,
            Self::Closed => CLOSED,
            Self::Info => INFO,
            Self::Custom(name) => name,
        }
    }

    /// Returns `true` for names only the server may produce.
    ///
    /// Clients cannot send `closed` or `info`.
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Closed | Self::Info)
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        match name {
            JOIN => Self::Join,
            LEAVE => Self::Leave,
            CLOSED => Self::Closed,
            INFO => Self::Info,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        match name.as_str() {
            JOIN => Self::Join,
            LEAVE => Self::Leave,
            CLOSED => Self::Closed,
            INFO => Self::Info,
            _ => Self::Custom(name),
        }
    }
}

impl From<Event> for String {
    fn from(event: Event) -> Self {
        match event {
            Event::Custom(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
