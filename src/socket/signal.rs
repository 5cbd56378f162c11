//! Outbound signaling.
//!
//! Any task holding a [`SocketHandle`] can instruct the socket's owning task.
//! Instructions are queued on an unbounded channel and consumed in send order,
//! interleaved with inbound frames as they arrive.
//!
//! All sends are fire-and-forget: if the owning task has already finished,
//! the instruction is dropped.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

use crate::identifiers::SocketId;
use crate::protocol::{Frame, ReplyOptions};

// ============================================================================
// Instruction
// ============================================================================

/// Instruction for a socket's owning task.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Write a frame to the client, then apply the options.
    Reply {
        /// Frame written verbatim.
        frame: Frame,
        /// Post-write options.
        options: ReplyOptions,
    },
    /// Close the connection in an orderly way.
    Terminate,
    /// Drop spare memory and wait for the next event.
    Hibernate,
    /// Deliver data to every joined topic as an `info` event.
    Info(Value),
}

// ============================================================================
// SocketHandle
// ============================================================================

/// Cloneable sender side of a socket's instruction queue.
#[derive(Debug, Clone)]
pub struct SocketHandle {
    /// Owning socket.
    id: SocketId,
    /// Instruction queue.
    tx: mpsc::UnboundedSender<Instruction>,
}

impl SocketHandle {
    /// Creates a handle and the receiver consumed by the owning task.
    pub(crate) fn channel(id: SocketId) -> (Self, mpsc::UnboundedReceiver<Instruction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { id, tx }, rx)
    }

    /// Returns the owning socket's ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SocketId {
        self.id
    }

    /// Writes a frame to the client.
    #[inline]
    pub fn reply(&self, frame: Frame) {
        self.reply_with(frame, ReplyOptions::default());
    }

    /// Writes a frame to the client with post-write options.
    #[inline]
    pub fn reply_with(&self, frame: Frame, options: ReplyOptions) {
        self.send(Instruction::Reply { frame, options });
    }

    /// Starts orderly shutdown of the connection.
    #[inline]
    pub fn terminate(&self) {
        self.send(Instruction::Terminate);
    }

    /// Asks the socket to hibernate until its next event.
    #[inline]
    pub fn hibernate(&self) {
        self.send(Instruction::Hibernate);
    }

    /// Delivers `data` to every joined topic as an `info` event.
    #[inline]
    pub fn info(&self, data: Value) {
        self.send(Instruction::Info(data));
    }

    /// Returns `true` once the owning task has finished.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Waits until the owning task has finished, including `closed`
    /// notifications.
    pub async fn closed(&self) {
        self.tx.closed().await;
    }

    fn send(&self, instruction: Instruction) {
        if self.tx.send(instruction).is_err() {
            trace!(socket_id = %self.id, "Socket closed, instruction dropped");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
