use serde::{Deserialize, Serialize};

use crate::proto::FrameKind;
use crate::sim::SimTime;

/// 帧类别（轨迹用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceFrameKind {
    Data,
    Ack,
    Nak,
}

impl From<FrameKind> for TraceFrameKind {
    fn from(kind: FrameKind) -> Self {
        match kind {
            FrameKind::Data => TraceFrameKind::Data,
            FrameKind::Ack => TraceFrameKind::Ack,
            FrameKind::Nak => TraceFrameKind::Nak,
        }
    }
}

/// 轨迹事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 会话元信息（t=0 的第一条事件）
    Meta {
        window_size: usize,
        max_seq: u16,
        timeout_ns: u64,
        nak_enabled: bool,
    },
    /// 发送数据帧
    SendData {
        peer: usize,
        seq: u16,
        ack: u16,
        retransmit: bool,
        tx_id: u64,
    },
    /// 发送裸确认
    SendAck { peer: usize, ack: u16, tx_id: u64 },
    /// 发送 NAK
    SendNak { peer: usize, ack: u16, tx_id: u64 },
    /// 故障注入：丢帧
    ChannelDrop { peer: usize, tx_id: u64 },
    /// 故障注入：损坏
    ChannelCorrupt { peer: usize, tx_id: u64 },
    /// 故障注入：重复投递
    ChannelDuplicate { peer: usize, tx_id: u64 },
    /// 帧到达对端
    FrameArrival {
        peer: usize,
        frame: TraceFrameKind,
        seq: u16,
        ack: u16,
        corrupt: bool,
    },
    /// 按序交付上层
    Deliver { peer: usize, seq: u16 },
    /// 序号不匹配，拒绝（重复帧或超前帧）
    Reject { peer: usize, seq: u16, expected: u16 },
    /// 累计 ack 滑窗
    WindowSlide {
        peer: usize,
        retired: u16,
        ack_expected: u16,
        in_flight: u16,
    },
    /// 重传定时器触发（go-back-N 整窗重传的起点）
    Timeout { peer: usize, seq: u16, resent: u16 },
}

/// 单条轨迹事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 仿真时间戳（纳秒）
    pub t_ns: u64,
    pub kind: TraceEventKind,
}

/// 轨迹记录器
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn record(&mut self, t: SimTime, kind: TraceEventKind) {
        self.events.push(TraceEvent { t_ns: t.0, kind });
    }
}
