//! Dispatch benchmark suite.
//!
//! Measures the per-frame cost of the socket state machine without a
//! transport:
//! - Envelope parsing
//! - Authorized event dispatch with 1, 16 and 256 joined topics
//! - Info fan-out across joined topics
//!
//! Run with: cargo bench --bench dispatch
//! Results saved to: target/criterion/

use std::sync::Arc;

use async_trait::async_trait;
use chanmux::{Message, Route, RouteResult, Router, Socket, SocketOptions};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;
use tokio::runtime::Runtime;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const TOPIC_COUNTS: &[usize] = &[1, 16, 256];

// ============================================================================
// Router
// ============================================================================

/// Router that accepts everything.
struct AcceptAll;

#[async_trait]
impl Router for AcceptAll {
    async fn route(&self, _socket: &mut Socket, _route: Route) -> RouteResult {
        Ok(())
    }
}

fn envelope(topic: &str, event: &str) -> String {
    json!({ "topic": topic, "event": event, "payload": { "body": "hello" } }).to_string()
}

async fn joined_socket(topics: usize) -> Socket {
    let (mut socket, _instructions) =
        Socket::new(Arc::new(AcceptAll), Arc::new(SocketOptions::new()));
    for index in 0..topics {
        socket
            .handle_text(&envelope(&format!("room:{index}"), "join"))
            .await
            .expect("join");
    }
    socket
}

// ============================================================================
// Benchmark: Envelope Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let text = envelope("room:lobby", "shout");

    c.bench_function("parse_envelope", |b| {
        b.iter(|| Message::parse(std::hint::black_box(&text)).expect("parse"));
    });
}

// ============================================================================
// Benchmark: Authorized Dispatch
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("dispatch_event");

    for &count in TOPIC_COUNTS {
        let mut socket = rt.block_on(joined_socket(count));
        let text = envelope("room:0", "shout");

        group.bench_with_input(BenchmarkId::new("topics", count), &count, |b, _| {
            b.iter(|| {
                rt.block_on(socket.handle_text(&text)).expect("dispatch");
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Info Fan-out
// ============================================================================

fn bench_info(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("info_fanout");

    for &count in TOPIC_COUNTS {
        let mut socket = rt.block_on(joined_socket(count));

        group.bench_with_input(BenchmarkId::new("topics", count), &count, |b, _| {
            b.iter(|| rt.block_on(socket.handle_info(json!({ "tick": 1 }))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_dispatch, bench_info);
criterion_main!(benches);
