//! Endpoint module.
//!
//! This module provides the entry point for serving connections.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Endpoint`] | Turns upgraded streams into running sockets |
//! | [`EndpointBuilder`] | Fluent configuration builder |
//! | [`SocketOptions`] | Options shared by every socket |
//!
//! # Example
//!
//! ```ignore
//! use chanmux::{Endpoint, Result};
//!
//! async fn serve(stream: tokio::net::TcpStream) -> Result<()> {
//!     let endpoint = Endpoint::builder().router(Rooms::default()).build()?;
//!
//!     let ws_stream = tokio_tungstenite::accept_async(stream).await?;
//!     let handle = endpoint.serve(ws_stream);
//!
//!     handle.closed().await;
//!     Ok(())
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for endpoint configuration.
pub mod builder;

/// Core endpoint implementation.
pub mod core;

/// Socket options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::EndpointBuilder;
pub use core::Endpoint;
pub use options::SocketOptions;
