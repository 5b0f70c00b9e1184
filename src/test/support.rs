//! Shared helpers for protocol scenario tests.

use crate::driver::{LinkConfig, SessionConfig};
use crate::proto::{ArqConfig, Payload};
use crate::sim::SimTime;
use crate::trace::{TraceEvent, TraceEventKind};

/// Distinct, ordered payloads.
pub fn payloads(n: usize) -> Vec<Payload> {
    (0..n).map(|i| format!("pkt-{i}").into_bytes()).collect()
}

/// A session over a fast, clean link: 50us one-way latency, 1Gbps,
/// 500us retransmit timeout. Individual tests layer fault plans and
/// payloads on top.
pub fn base_session(window_size: usize, nak_enabled: bool) -> SessionConfig {
    SessionConfig {
        arq: ArqConfig {
            window_size,
            timeout: SimTime::from_micros(500),
            nak_enabled,
        },
        link: LinkConfig {
            latency: SimTime::from_micros(50),
            bandwidth_bps: 1_000_000_000,
        },
        trace: true,
        ..SessionConfig::default()
    }
}

pub fn count_delivers(events: &[TraceEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e.kind, TraceEventKind::Deliver { .. }))
        .count()
}

pub fn count_timeouts(events: &[TraceEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e.kind, TraceEventKind::Timeout { .. }))
        .count()
}

pub fn count_retransmits(events: &[TraceEvent]) -> usize {
    events
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                TraceEventKind::SendData {
                    retransmit: true,
                    ..
                }
            )
        })
        .count()
}

pub fn count_naks(events: &[TraceEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e.kind, TraceEventKind::SendNak { .. }))
        .count()
}
