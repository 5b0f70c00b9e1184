use crate::driver::ProtocolDriver;
use crate::link::FaultPlan;
use crate::sim::SimTime;
use crate::trace::TraceEventKind;

use super::support::{base_session, count_delivers, payloads};

#[test]
fn duplicated_data_frame_is_reacked_but_not_redelivered() {
    let sent = payloads(6);
    let mut cfg = base_session(4, false);
    cfg.payloads_a = sent.clone();
    // The channel delivers the second transmission (seq 1) twice.
    cfg.faults_a_to_b = FaultPlan::default().duplicate_at([1]);
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();
    let events = &report.trace.as_ref().expect("trace enabled").events;

    assert!(report.finished, "session did not drain");
    assert_eq!(report.delivered_to_b, sent);
    assert_eq!(report.stats_a_to_b.duplicated_frames, 1);
    assert_eq!(count_delivers(events), 6);

    // The second copy is rejected as a duplicate and answered with a
    // fresh ack instead of a delivery.
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, TraceEventKind::Reject { peer: 1, seq: 1, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, TraceEventKind::ChannelDuplicate { peer: 0, .. })));
}

#[test]
fn duplicated_ack_is_idempotent() {
    let sent = payloads(6);
    let mut cfg = base_session(4, false);
    cfg.payloads_a = sent.clone();
    cfg.faults_b_to_a = FaultPlan::default().duplicate_at([0]);
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();

    assert!(report.finished, "session did not drain");
    assert_eq!(report.delivered_to_b, sent);
    assert!(report.max_in_flight <= 3);
}
