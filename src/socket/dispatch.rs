//! Inbound message dispatch.
//!
//! The dispatcher is the protocol state machine. For each message it decides
//! whether the router may see it, calls the router, and folds the outcome
//! back into the joined-topic set.
//!
//! | Event | Gate | On `Ok` | On `Err` |
//! |-------|------|---------|----------|
//! | `join` | none | insert topic | unchanged |
//! | `leave` | must be joined | remove topic | unchanged |
//! | other | must be joined | unchanged | unchanged |
//!
//! Every error here is contained to the message that caused it. The caller
//! logs it and keeps the connection open. A router panic counts as a router
//! error: the membership fold is skipped and the socket keeps serving.

// ============================================================================
// Imports
// ============================================================================

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::{Value, json};
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::Topic;
use crate::protocol::{Event, Message};
use crate::router::{Route, RouteError, RouteResult};

use super::Socket;

// ============================================================================
// Constants
// ============================================================================

/// Event name of the envelope sent for unauthorized events when enabled.
const ERROR_EVENT: &str = "error";

// ============================================================================
// Socket - Dispatch
// ============================================================================

impl Socket {
    /// Parses and dispatches one inbound text frame.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] if the frame is not a valid envelope
    /// - [`Error::Unauthorized`] if the topic is not joined
    /// - [`Error::Router`] if the router rejects the event
    pub async fn handle_text(&mut self, text: &str) -> Result<()> {
        let message = Message::parse(text)?;
        self.handle_message(message).await
    }

    /// Parses and dispatches one inbound binary frame.
    ///
    /// # Errors
    ///
    /// Same as [`Socket::handle_text`], plus [`Error::Parse`] on invalid
    /// UTF-8.
    pub async fn handle_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let message = Message::parse_bytes(bytes)?;
        self.handle_message(message).await
    }

    /// Dispatches one parsed message.
    ///
    /// `join` always reaches the router. Any other event reaches it only if
    /// the topic is joined.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] if the topic is not joined
    /// - [`Error::Router`] if the router rejects the event
    pub async fn handle_message(&mut self, message: Message) -> Result<()> {
        let Message {
            topic,
            event,
            payload,
        } = message;

        if event != Event::Join && !self.authorized(topic.as_str()) {
            debug!(
                socket_id = %self.id(),
                topic = %topic,
                event = %event,
                "Event on unjoined topic dropped"
            );

            if self.options.notify_unauthorized {
                self.reply_unauthorized(&topic, &event);
            }

            return Err(Error::unauthorized(topic, event.as_str()));
        }

        if let Err(e) = self.route(topic.clone(), event.clone(), payload).await {
            return Err(Error::router(topic, event.as_str(), e.reason));
        }

        match event {
            Event::Join => {
                if self.joined.insert(topic.clone()) {
                    debug!(socket_id = %self.id(), topic = %topic, "Joined topic");
                } else {
                    trace!(socket_id = %self.id(), topic = %topic, "Rejoined topic");
                }
            }
            Event::Leave => {
                if self.joined.remove(topic.as_str()) {
                    debug!(socket_id = %self.id(), topic = %topic, "Left topic");
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Delivers out-of-band data to every joined topic as an `info` event.
    ///
    /// Not gated: info comes from the server side, not the client. Router
    /// rejections are logged and do not stop delivery to other topics.
    ///
    /// Returns the number of topics the data was routed to.
    pub async fn handle_info(&mut self, data: Value) -> usize {
        let topics: Vec<Topic> = self.joined.iter().cloned().collect();
        let count = topics.len();

        for topic in topics {
            if let Err(e) = self.route(topic.clone(), Event::Info, data.clone()).await {
                warn!(
                    socket_id = %self.id(),
                    topic = %topic,
                    reason = %e,
                    "Info rejected by router"
                );
            }
        }

        trace!(socket_id = %self.id(), topics = count, "Info delivered");
        count
    }

    /// Calls the router for one topic and event.
    ///
    /// A panic inside the router is caught and returned as a [`RouteError`].
    pub(crate) async fn route(
        &mut self,
        topic: Topic,
        event: Event,
        payload: Value,
    ) -> RouteResult {
        let socket_id = self.id();
        let router = Arc::clone(&self.router);
        let route = Route {
            protocol: Arc::clone(&self.options.protocol),
            topic: topic.clone(),
            event: event.clone(),
            payload,
        };

        match AssertUnwindSafe(router.route(self, route))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(
                    %socket_id,
                    topic = %topic,
                    event = %event,
                    panic = %message,
                    "Router panicked"
                );
                Err(RouteError::new(format!("router panicked: {message}")))
            }
        }
    }

    /// Queues an `error` envelope for an unauthorized event.
    fn reply_unauthorized(&self, topic: &Topic, event: &Event) {
        let message = Message::new(
            topic.clone(),
            ERROR_EVENT,
            json!({ "reason": "unauthorized", "event": event.as_str() }),
        );

        match message.to_frame() {
            Ok(frame) => self.handle.reply(frame),
            Err(e) => warn!(error = %e, "Failed to encode unauthorized reply"),
        }
    }
}

/// Extracts the message of a caught panic.
fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

// ============================================================================
// Tests
// ============================================================================
