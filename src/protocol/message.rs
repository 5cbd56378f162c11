//! Message envelope codec.
//!
//! Every inbound text frame carries exactly one envelope:
//!
//! ```json
//! {
//!   "topic": "room:lobby",
//!   "event": "shout",
//!   "payload": { ... }
//! }
//! ```
//!
//! All three fields are required and no other field is accepted. Parsing
//! fails closed: anything that is not this shape is a [`Error::Parse`] and
//! the frame never reaches the dispatcher.

// ============================================================================
// Imports
// ============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Value, from_str, from_value, to_string};

use crate::error::{Error, Result};
use crate::identifiers::Topic;

use super::event::Event;
use super::frame::Frame;

// ============================================================================
// Wire Shape
// ============================================================================

/// Strict wire representation used only for decoding.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    topic: String,
    event: String,
    payload: Value,
}

// ============================================================================
// Message
// ============================================================================

/// One parsed envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Target channel.
    pub topic: Topic,

    /// Event name.
    pub event: Event,

    /// Router-defined payload, not interpreted here.
    pub payload: Value,
}

impl Message {
    /// Creates a message.
    #[inline]
    #[must_use]
    pub fn new(topic: impl Into<Topic>, event: impl Into<Event>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            event: event.into(),
            payload,
        }
    }

    /// Parses an inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not valid JSON, is not an
    /// object, lacks a field, carries an unknown field, has an empty topic or
    /// event, or uses an internal event name.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value =
            from_str(text).map_err(|e| Error::parse(format!("invalid JSON: {e}")))?;

        if !value.is_object() {
            return Err(Error::parse("envelope must be a JSON object"));
        }

        let envelope: Envelope =
            from_value(value).map_err(|e| Error::parse(format!("invalid envelope: {e}")))?;

        if envelope.topic.is_empty() {
            return Err(Error::parse("empty topic"));
        }

        if envelope.event.is_empty() {
            return Err(Error::parse("empty event"));
        }

        let event = Event::from(envelope.event);
        if event.is_internal() {
            return Err(Error::parse(format!("reserved event: {event}")));
        }

        Ok(Self {
            topic: Topic::from(envelope.topic),
            event,
            payload: envelope.payload,
        })
    }

    /// Parses an inbound binary frame as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on invalid UTF-8 or an invalid envelope.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::parse(format!("invalid UTF-8: {e}")))?;
        Self::parse(text)
    }

    /// Encodes the message as envelope text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload cannot be serialized.
    pub fn encode(&self) -> Result<String> {
        Ok(to_string(self)?)
    }

    /// Encodes the message as a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload cannot be serialized.
    pub fn to_frame(&self) -> Result<Frame> {
        Ok(Frame::Text(self.encode()?))
    }
}

impl FromStr for Message {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

// ============================================================================
// Tests
// ============================================================================
