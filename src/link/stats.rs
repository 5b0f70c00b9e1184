//! 链路统计
//!
//! 单向链路的故障注入计数。

/// 单向链路统计
#[derive(Debug, Default, Clone)]
pub struct LinkStats {
    pub sent_frames: u64,
    pub dropped_frames: u64,
    pub corrupted_frames: u64,
    pub duplicated_frames: u64,
}
