use crate::proto::{Acceptance, Payload, Receiver, SeqNr, SeqSpace, UpperLayer};

/// Upper layer that only collects deliveries.
#[derive(Default)]
struct SinkUpper {
    delivered: Vec<Payload>,
}

impl UpperLayer for SinkUpper {
    fn next_packet(&mut self) -> Option<Payload> {
        None
    }

    fn deliver(&mut self, payload: Payload) {
        self.delivered.push(payload);
    }
}

fn receiver(window: usize) -> Receiver {
    Receiver::new(SeqSpace::new(window).expect("valid window"))
}

#[test]
fn in_order_frame_is_delivered_once_and_advances() {
    let mut r = receiver(4);
    let mut upper = SinkUpper::default();

    assert_eq!(
        r.on_data(SeqNr(0), b"one".to_vec(), &mut upper),
        Acceptance::Delivered
    );
    assert_eq!(r.frame_expected(), SeqNr(1));
    assert_eq!(upper.delivered, vec![b"one".to_vec()]);
    // The outgoing cumulative ack now covers the frame just accepted.
    assert_eq!(r.ack_value(), SeqNr(0));
}

#[test]
fn out_of_order_frame_is_rejected_without_delivery() {
    let mut r = receiver(4);
    let mut upper = SinkUpper::default();

    assert_eq!(
        r.on_data(SeqNr(2), b"early".to_vec(), &mut upper),
        Acceptance::Rejected
    );
    assert_eq!(r.frame_expected(), SeqNr(0));
    assert!(upper.delivered.is_empty());
}

#[test]
fn duplicate_frame_is_not_redelivered() {
    let mut r = receiver(4);
    let mut upper = SinkUpper::default();

    assert_eq!(
        r.on_data(SeqNr(0), b"one".to_vec(), &mut upper),
        Acceptance::Delivered
    );
    // Retransmission race: the same frame shows up again.
    assert_eq!(
        r.on_data(SeqNr(0), b"one".to_vec(), &mut upper),
        Acceptance::Rejected
    );
    assert_eq!(upper.delivered.len(), 1);
    // It still gets re-acknowledged via the unchanged cumulative ack.
    assert_eq!(r.ack_value(), SeqNr(0));
}

#[test]
fn ack_value_wraps_below_zero() {
    let r = receiver(4);
    // Nothing received yet: "everything before 0" encodes as MAX_SEQ.
    assert_eq!(r.ack_value(), SeqNr(3));
}

#[test]
fn nak_latch_allows_one_nak_per_gap() {
    let mut r = receiver(4);
    let mut upper = SinkUpper::default();

    assert_eq!(
        r.on_data(SeqNr(1), b"early".to_vec(), &mut upper),
        Acceptance::Rejected
    );
    assert!(r.take_nak());
    assert!(!r.take_nak());

    // Filling the gap re-arms the latch for the next gap.
    assert_eq!(
        r.on_data(SeqNr(0), b"one".to_vec(), &mut upper),
        Acceptance::Delivered
    );
    assert!(r.take_nak());
}
