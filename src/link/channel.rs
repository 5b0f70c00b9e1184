//! 仿真信道
//!
//! 协议侧 `Channel` 接口的仿真实现：send 只把帧放进发件箱；驱动
//! 层在每次引擎调用结束后统一取走，套用故障计划与链路时序，再
//! 调度到达事件。这样引擎内部看不到仿真器，单元测试也可以换成
//! 纯记录用的信道。

use tracing::{debug, trace};

use crate::proto::{Channel, Frame};
use crate::sim::SimTime;

use super::faults::FaultPlan;
use super::link::Link;
use super::stats::LinkStats;

/// 帧头开销（字节），计入串行化时间
pub const FRAME_OVERHEAD_BYTES: usize = 8;

/// 一次传输的结果：帧（已套用损坏）、各次到达时刻（空 = 被丢弃，
/// 两项 = 重复投递）。
#[derive(Debug)]
pub struct TxRecord {
    pub tx_id: u64,
    pub frame: Frame,
    pub arrivals: Vec<SimTime>,
    pub corrupted: bool,
}

/// 经过故障注入的单向仿真信道。
#[derive(Debug)]
pub struct SimChannel {
    link: Link,
    faults: FaultPlan,
    outbox: Vec<Frame>,
    next_tx_id: u64,
    pub stats: LinkStats,
}

impl Channel for SimChannel {
    fn send(&mut self, frame: Frame) {
        trace!(kind = ?frame.kind, seq = frame.seq.0, ack = frame.ack.0, "帧入发件箱");
        self.outbox.push(frame);
    }
}

impl SimChannel {
    pub fn new(link: Link, faults: FaultPlan) -> SimChannel {
        SimChannel {
            link,
            faults,
            outbox: Vec::new(),
            next_tx_id: 0,
            stats: LinkStats::default(),
        }
    }

    /// 取走待发帧，套用故障计划与链路时序。被丢弃的帧仍产出记录
    /// （到达列表为空），供轨迹与统计使用。
    pub fn drain(&mut self, now: SimTime) -> Vec<TxRecord> {
        let mut out = Vec::new();
        for mut frame in std::mem::take(&mut self.outbox) {
            let tx_id = self.next_tx_id;
            self.next_tx_id += 1;
            self.stats.sent_frames += 1;

            if self.faults.should_drop(tx_id) {
                self.stats.dropped_frames += 1;
                debug!(tx_id, "故障注入：丢帧");
                out.push(TxRecord {
                    tx_id,
                    frame,
                    arrivals: Vec::new(),
                    corrupted: false,
                });
                continue;
            }

            let corrupted = self.faults.should_corrupt(tx_id);
            if corrupted {
                frame.checksum_ok = false;
                self.stats.corrupted_frames += 1;
                debug!(tx_id, "故障注入：损坏");
            }

            let bytes = frame.payload.len() + FRAME_OVERHEAD_BYTES;
            let mut arrive = self.link.schedule_arrival(now, bytes);
            if let Some(extra) = self.faults.extra_delay(tx_id) {
                arrive = arrive.saturating_add(extra);
            }

            let mut arrivals = vec![arrive];
            if self.faults.should_duplicate(tx_id) {
                // 复制帧再占用一次链路
                self.stats.duplicated_frames += 1;
                debug!(tx_id, "故障注入：重复投递");
                arrivals.push(self.link.schedule_arrival(now, bytes));
            }

            out.push(TxRecord {
                tx_id,
                frame,
                arrivals,
                corrupted,
            });
        }
        out
    }
}
