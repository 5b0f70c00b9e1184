use crate::proto::{recommended_window_size, ArqConfig, ConfigError};
use crate::sim::SimTime;

#[test]
fn validate_rejects_degenerate_window_and_timeout() {
    let bad_window = ArqConfig {
        window_size: 1,
        ..ArqConfig::default()
    };
    assert_eq!(
        bad_window.validate(),
        Err(ConfigError::WindowTooSmall { window_size: 1 })
    );

    let bad_timeout = ArqConfig {
        timeout: SimTime::ZERO,
        ..ArqConfig::default()
    };
    assert_eq!(bad_timeout.validate(), Err(ConfigError::ZeroTimeout));

    assert!(ArqConfig::default().validate().is_ok());
}

#[test]
fn bdp_window_rounds_frames_up() {
    // 1 Mbps, 100 ms one-way delay, 8192-bit frames:
    // ceil(1e6 * 0.1 / 8192) = 13 frames in the pipe, window = 1 + 2*13.
    let w = recommended_window_size(1_000_000, SimTime::from_millis(100), 8192);
    assert_eq!(w, 27);
}

#[test]
fn bdp_window_never_below_protocol_minimum() {
    assert_eq!(
        recommended_window_size(0, SimTime::from_millis(100), 8192),
        2
    );
    assert_eq!(recommended_window_size(1_000_000, SimTime::ZERO, 8192), 2);
    // Tiny bandwidth-delay product still leaves room for one frame
    // each way plus the one in flight.
    assert_eq!(
        recommended_window_size(1_000, SimTime::from_micros(1), 8192),
        3
    );
}
