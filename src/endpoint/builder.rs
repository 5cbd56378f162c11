//! Builder pattern for endpoint configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use chanmux::Endpoint;
//!
//! let endpoint = Endpoint::builder()
//!     .router(Rooms::default())
//!     .idle_timeout(Duration::from_secs(60))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::router::Router;

use super::core::Endpoint;
use super::options::SocketOptions;

// ============================================================================
// EndpointBuilder
// ============================================================================

/// Builder for configuring an [`Endpoint`].
///
/// Use [`Endpoint::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct EndpointBuilder {
    /// Router shared by all sockets.
    router: Option<Arc<dyn Router>>,
    /// Socket options.
    options: SocketOptions,
}

// ============================================================================
// EndpointBuilder Implementation
// ============================================================================

impl EndpointBuilder {
    /// Creates a builder with default options and no router.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the router.
    #[inline]
    #[must_use]
    pub fn router(mut self, router: impl Router) -> Self {
        self.router = Some(Arc::new(router));
        self
    }

    /// Sets an already shared router.
    #[inline]
    #[must_use]
    pub fn shared_router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    /// Replaces all socket options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: SocketOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the protocol name given to the router.
    #[inline]
    #[must_use]
    pub fn protocol(mut self, protocol: impl AsRef<str>) -> Self {
        self.options = self.options.with_protocol(protocol);
        self
    }

    /// Enables `error` replies for unauthorized events.
    #[inline]
    #[must_use]
    pub fn notify_unauthorized(mut self) -> Self {
        self.options = self.options.with_notify_unauthorized();
        self
    }

    /// Sets the idle timeout.
    #[inline]
    #[must_use]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_idle_timeout(timeout);
        self
    }

    /// Builds the endpoint with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no router is set
    /// - [`Error::Config`] if the options are invalid
    pub fn build(self) -> Result<Endpoint> {
        let router = self
            .router
            .ok_or_else(|| Error::config("router is required"))?;

        self.options.validate()?;

        Ok(Endpoint::new(router, self.options))
    }
}

impl fmt::Debug for EndpointBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointBuilder")
            .field("router", &self.router.is_some())
            .field("options", &self.options)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
