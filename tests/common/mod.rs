//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chanmux::{Event, Message, Route, RouteError, RouteResult, Router, Socket};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use tokio::io::{DuplexStream, duplex};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::protocol::Role;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Tracing
// ============================================================================

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Transport
// ============================================================================

/// Creates a connected server/client WebSocket pair over an in-memory pipe.
pub async fn ws_pair() -> (WebSocketStream<DuplexStream>, WebSocketStream<DuplexStream>) {
    let (server_io, client_io) = duplex(64 * 1024);
    let server = WebSocketStream::from_raw_socket(server_io, Role::Server, None).await;
    let client = WebSocketStream::from_raw_socket(client_io, Role::Client, None).await;
    (server, client)
}

/// Encodes an envelope as client frame text.
pub fn envelope(topic: &str, event: &str, payload: Value) -> String {
    json!({ "topic": topic, "event": event, "payload": payload }).to_string()
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 2s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

// ============================================================================
// Router
// ============================================================================

/// One observed router call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub protocol: String,
    pub topic: String,
    pub event: String,
    pub payload: Value,
    /// Socket assigns as the router saw them.
    pub assigns: Map<String, Value>,
}

/// Router that records every call.
///
/// - Rejects joins on topics starting with `private:`
/// - Panics on the `boom` event
/// - Echoes application events back to the client as envelopes
#[derive(Default)]
pub struct TestRouter {
    calls: Mutex<Vec<Call>>,
}

impl TestRouter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, event: &str) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.event == event)
            .cloned()
            .collect()
    }

    pub fn count(&self, event: &str) -> usize {
        self.calls_for(event).len()
    }
}

#[async_trait]
impl Router for TestRouter {
    async fn route(&self, socket: &mut Socket, route: Route) -> RouteResult {
        self.calls.lock().push(Call {
            protocol: route.protocol.to_string(),
            topic: route.topic.to_string(),
            event: route.event.to_string(),
            payload: route.payload.clone(),
            assigns: socket.assigns().clone(),
        });

        match route.event {
            Event::Join if route.topic.as_str().starts_with("private:") => {
                Err(RouteError::new("forbidden"))
            }
            Event::Custom(ref name) if name == "boom" => {
                panic!("router exploded on {}", route.topic)
            }
            Event::Custom(_) => {
                let message = Message::new(route.topic, route.event, route.payload);
                let frame = message.to_frame().map_err(|e| RouteError::new(e.to_string()))?;
                socket.handle().reply(frame);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
