use crate::driver::ProtocolDriver;
use crate::sim::SimTime;
use crate::trace::{TraceEventKind, TraceFrameKind};

use super::support::{base_session, payloads};

#[test]
fn both_directions_complete_in_order() {
    let a_sent = payloads(5);
    let b_sent: Vec<_> = (0..5)
        .map(|i| format!("rsp-{i}").into_bytes())
        .collect();

    let mut cfg = base_session(4, false);
    cfg.payloads_a = a_sent.clone();
    cfg.payloads_b = b_sent.clone();
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();

    assert!(report.finished, "session did not drain");
    assert_eq!(report.delivered_to_b, a_sent);
    assert_eq!(report.delivered_to_a, b_sent);
    assert!(report.max_in_flight <= 3);
}

#[test]
fn data_frames_piggyback_acks_that_slide_the_window() {
    let mut cfg = base_session(4, false);
    cfg.payloads_a = payloads(5);
    cfg.payloads_b = (0..5).map(|i| format!("rsp-{i}").into_bytes()).collect();
    cfg.deadline = Some(SimTime::from_secs(1));

    let report = ProtocolDriver::new(cfg)
        .expect("session config valid")
        .run();
    let events = &report.trace.as_ref().expect("trace enabled").events;

    // Find a window slide whose triggering arrival was a data frame:
    // the ack rode on the data instead of a bare control frame.
    let mut last_arrival = [None::<TraceFrameKind>; 2];
    let mut piggybacked_slide = false;
    for e in events {
        match e.kind {
            TraceEventKind::FrameArrival { peer, frame, .. } => {
                last_arrival[peer] = Some(frame);
            }
            TraceEventKind::WindowSlide { peer, .. } => {
                if last_arrival[peer] == Some(TraceFrameKind::Data) {
                    piggybacked_slide = true;
                }
            }
            _ => {}
        }
    }
    assert!(
        piggybacked_slide,
        "expected at least one cumulative ack piggybacked on a data frame"
    );
}
