//! Connection event loop.
//!
//! Each connection runs in exactly one tokio task, the socket's owning
//! context. The task is the only thing that touches the socket state and the
//! WebSocket write half.
//!
//! # Event Loop
//!
//! The task selects over three sources and handles one item at a time:
//!
//! - Inbound frames from the client (parsed and dispatched)
//! - Instructions from [`SocketHandle`](crate::SocketHandle)s (replies,
//!   terminate, hibernate, info)
//! - The idle timer, when configured
//!
//! When the loop ends, the teardown reason is handed to
//! [`Socket::close`] so every joined topic is notified.

// ============================================================================
// Imports
// ============================================================================

use std::future::pending;
use std::result::Result as StdResult;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::identifiers::SocketId;
use crate::protocol::{Frame, ReplyOptions, TeardownReason};
use crate::socket::{Instruction, Socket};

// ============================================================================
// Types
// ============================================================================

/// Write half of the WebSocket.
type WsWrite<S> = SplitSink<WebSocketStream<S>, WsMessage>;

// ============================================================================
// Connection
// ============================================================================

/// One WebSocket connection bound to its socket.
///
/// Created by [`Endpoint::serve`](crate::Endpoint::serve) and consumed by
/// [`Connection::run`].
pub struct Connection<S> {
    /// Upgraded transport stream.
    ws_stream: WebSocketStream<S>,
    /// Socket owned by this connection.
    socket: Socket,
    /// Instruction queue for the socket.
    instructions: mpsc::UnboundedReceiver<Instruction>,
    /// Idle timeout, if any.
    idle_timeout: Option<Duration>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    /// Binds a socket to an upgraded stream.
    pub(crate) fn new(
        ws_stream: WebSocketStream<S>,
        socket: Socket,
        instructions: mpsc::UnboundedReceiver<Instruction>,
        idle_timeout: Option<Duration>,
    ) -> Self {
        Self {
            ws_stream,
            socket,
            instructions,
            idle_timeout,
        }
    }

    /// Returns the socket ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SocketId {
        self.socket.id()
    }

    /// Runs the event loop until teardown, then notifies joined topics.
    ///
    /// Returns the teardown reason.
    pub async fn run(self) -> TeardownReason {
        let Self {
            ws_stream,
            mut socket,
            mut instructions,
            idle_timeout,
        } = self;

        let socket_id = socket.id();
        let (mut ws_write, mut ws_read) = ws_stream.split();

        debug!(%socket_id, "Event loop started");

        let reason = loop {
            tokio::select! {
                // Incoming frames from the client
                message = ws_read.next() => {
                    match message {
                        Some(Ok(WsMessage::Text(text))) => {
                            trace!(%socket_id, len = text.len(), "Text frame received");
                            let result = socket.handle_text(text.as_str()).await;
                            Self::log_dispatch_error(socket_id, result);
                        }

                        Some(Ok(WsMessage::Binary(bytes))) => {
                            trace!(%socket_id, len = bytes.len(), "Binary frame received");
                            let result = socket.handle_bytes(&bytes).await;
                            Self::log_dispatch_error(socket_id, result);
                        }

                        Some(Ok(WsMessage::Close(frame))) => {
                            debug!(%socket_id, "WebSocket closed by remote");
                            break TeardownReason::from_close(frame);
                        }

                        Some(Err(e)) => {
                            warn!(%socket_id, error = %e, "WebSocket error");
                            break TeardownReason::from_ws_error(&e);
                        }

                        None => {
                            debug!(%socket_id, "WebSocket stream ended");
                            break TeardownReason::RemoteClose;
                        }

                        // Ping/Pong are answered by tungstenite
                        Some(Ok(_)) => {}
                    }
                }

                // Instructions from socket handles. The socket holds a
                // sender, so the queue stays open while the loop runs.
                Some(instruction) = instructions.recv() => {
                    match instruction {
                        Instruction::Reply { frame, options } => {
                            if let Err(reason) =
                                Self::handle_reply(&mut socket, &mut ws_write, frame, options).await
                            {
                                break reason;
                            }
                        }

                        Instruction::Terminate => {
                            debug!(%socket_id, "Terminate instruction received");
                            let _ = ws_write.close().await;
                            break TeardownReason::Shutdown;
                        }

                        Instruction::Hibernate => {
                            Self::hibernate(&mut socket, &mut ws_write).await;
                        }

                        Instruction::Info(data) => {
                            socket.handle_info(data).await;
                        }
                    }
                }

                // Idle timer, reset on every loop iteration
                () = Self::idle(idle_timeout) => {
                    debug!(%socket_id, ?idle_timeout, "Idle timeout elapsed");
                    let _ = ws_write.close().await;
                    break TeardownReason::Timeout;
                }
            }
        };

        socket.close(reason.clone()).await;

        // Dropping the receiver last makes `SocketHandle::closed` resolve
        // only after every `closed` notification was routed.
        drop(instructions);

        debug!(%socket_id, "Event loop terminated");
        reason
    }

    /// Writes a reply frame and applies its options.
    async fn handle_reply(
        socket: &mut Socket,
        ws_write: &mut WsWrite<S>,
        frame: Frame,
        options: ReplyOptions,
    ) -> StdResult<(), TeardownReason> {
        if let Err(e) = ws_write.send(WsMessage::from(frame)).await {
            warn!(socket_id = %socket.id(), error = %e, "Failed to send reply");
            return Err(TeardownReason::from_ws_error(&e));
        }

        trace!(socket_id = %socket.id(), "Reply sent");

        if let Some(state) = options.state {
            socket.replace_assigns(state);
        }

        if options.hibernate {
            Self::hibernate(socket, ws_write).await;
        }

        Ok(())
    }

    /// Flushes pending writes and shrinks socket state.
    async fn hibernate(socket: &mut Socket, ws_write: &mut WsWrite<S>) {
        if let Err(e) = ws_write.flush().await {
            warn!(socket_id = %socket.id(), error = %e, "Flush before hibernate failed");
        }
        socket.hibernate();
    }

    /// Resolves after `timeout`, or never when disabled.
    async fn idle(timeout: Option<Duration>) {
        match timeout {
            Some(timeout) => sleep(timeout).await,
            None => pending::<()>().await,
        }
    }

    /// Logs a contained per-message failure.
    fn log_dispatch_error(socket_id: SocketId, result: Result<()>) {
        match result {
            Ok(()) => {}
            Err(e) if e.is_unauthorized() => {
                debug!(%socket_id, error = %e, "Message dropped");
            }
            Err(e) => {
                warn!(%socket_id, error = %e, "Message dropped");
            }
        }
    }
}
