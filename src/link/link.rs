//! 链路时序
//!
//! 单向链路：传播时延 + 带宽串行化。`busy_until` 记录上一帧发完
//! 的时刻，同一条链路上的帧按序占用发送端口。

use crate::sim::SimTime;

/// 单向链路
#[derive(Debug, Clone)]
pub struct Link {
    pub latency: SimTime,
    pub bandwidth_bps: u64,
    pub busy_until: SimTime,
}

impl Link {
    /// 创建新链路
    pub fn new(latency: SimTime, bandwidth_bps: u64) -> Self {
        Self {
            latency,
            bandwidth_bps,
            busy_until: SimTime::ZERO,
        }
    }

    /// 计算传输指定字节数所需的时间
    pub(crate) fn tx_time(&self, bytes: usize) -> SimTime {
        // ceil(bytes*8 / bps) 秒 -> 纳秒
        if self.bandwidth_bps == 0 {
            return SimTime(u64::MAX / 4);
        }
        let bits = (bytes as u128).saturating_mul(8);
        let nanos = (bits.saturating_mul(1_000_000_000) + (self.bandwidth_bps as u128 - 1))
            / self.bandwidth_bps as u128;
        SimTime(nanos.min(u64::MAX as u128) as u64)
    }

    /// 计算一帧的到达时刻并推进链路占用
    pub fn schedule_arrival(&mut self, now: SimTime, frame_bytes: usize) -> SimTime {
        let start = now.max(self.busy_until);
        let depart = start.saturating_add(self.tx_time(frame_bytes));
        self.busy_until = depart;
        depart.saturating_add(self.latency)
    }
}
