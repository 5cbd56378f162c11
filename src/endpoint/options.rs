//! Per-socket configuration.
//!
//! Every socket served by an endpoint shares one [`SocketOptions`].
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use chanmux::SocketOptions;
//!
//! let options = SocketOptions::new()
//!     .with_protocol("websocket")
//!     .with_notify_unauthorized()
//!     .with_idle_timeout(Duration::from_secs(60));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Protocol name passed to the router by default.
pub const DEFAULT_PROTOCOL: &str = "websocket";

// ============================================================================
// SocketOptions
// ============================================================================

/// Options shared by all sockets of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketOptions {
    /// Protocol name given to the router on every call.
    pub protocol: Arc<str>,

    /// Reply with an `error` envelope when an event targets an unjoined
    /// topic. Off by default: unauthorized events are dropped silently.
    pub notify_unauthorized: bool,

    /// Tear the connection down after this long without inbound frames or
    /// instructions. `None` disables the timer.
    pub idle_timeout: Option<Duration>,
}

impl Default for SocketOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl SocketOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            protocol: Arc::from(DEFAULT_PROTOCOL),
            notify_unauthorized: false,
            idle_timeout: None,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SocketOptions {
    /// Sets the protocol name given to the router.
    #[inline]
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl AsRef<str>) -> Self {
        self.protocol = Arc::from(protocol.as_ref());
        self
    }

    /// Enables `error` replies for unauthorized events.
    #[inline]
    #[must_use]
    pub fn with_notify_unauthorized(mut self) -> Self {
        self.notify_unauthorized = true;
        self
    }

    /// Sets the idle timeout.
    #[inline]
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SocketOptions {
    /// Checks the options for values that can never work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty protocol name or a zero idle
    /// timeout.
    pub fn validate(&self) -> Result<()> {
        if self.protocol.is_empty() {
            return Err(Error::config("protocol name must not be empty"));
        }

        if self.idle_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(Error::config("idle timeout must be greater than zero"));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SocketOptions::new();
        assert_eq!(&*options.protocol, "websocket");
        assert!(!options.notify_unauthorized);
        assert!(options.idle_timeout.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let options = SocketOptions::new()
            .with_protocol("longpoll")
            .with_notify_unauthorized()
            .with_idle_timeout(Duration::from_secs(5));

        assert_eq!(&*options.protocol, "longpoll");
        assert!(options.notify_unauthorized);
        assert_eq!(options.idle_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_validate_rejects_empty_protocol() {
        let options = SocketOptions::new().with_protocol("");
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let options = SocketOptions::new().with_idle_timeout(Duration::ZERO);
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }
}
