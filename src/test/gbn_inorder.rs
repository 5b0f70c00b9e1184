use crate::driver::ProtocolDriver;
use crate::sim::SimTime;
use crate::trace::TraceEventKind;

use super::support::{base_session, count_delivers, count_timeouts, payloads};

#[test]
fn six_payloads_window_four_deliver_in_order() {
    let sent = payloads(6);
    let mut cfg = base_session(4, false);
    cfg.payloads_a = sent.clone();
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();

    assert!(report.finished, "session did not drain");
    assert_eq!(report.delivered_to_b, sent);
    assert!(report.delivered_to_a.is_empty());
    // A window of 4 sequence numbers keeps at most 3 frames in flight.
    assert!(
        report.max_in_flight <= 3,
        "window overrun: {} frames in flight",
        report.max_in_flight
    );
}

#[test]
fn clean_run_has_no_timeouts_and_no_rejects() {
    let sent = payloads(6);
    let mut cfg = base_session(4, false);
    cfg.payloads_a = sent.clone();
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();
    let events = &report.trace.as_ref().expect("trace enabled").events;

    assert_eq!(count_delivers(events), 6);
    assert_eq!(count_timeouts(events), 0);
    assert!(!events
        .iter()
        .any(|e| matches!(e.kind, TraceEventKind::Reject { .. })));
}

#[test]
fn trace_starts_with_session_meta() {
    let mut cfg = base_session(4, false);
    cfg.payloads_a = payloads(2);
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();
    let events = &report.trace.as_ref().expect("trace enabled").events;

    assert!(
        matches!(
            events.first().map(|e| &e.kind),
            Some(TraceEventKind::Meta {
                window_size: 4,
                max_seq: 3,
                ..
            })
        ),
        "first trace event must be session meta"
    );
}
