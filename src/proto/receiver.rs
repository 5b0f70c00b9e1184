//! 接收引擎
//!
//! 只接受 `frame_expected` 指向的按序帧，交付上层恰好一次；其余
//! 一律拒绝。重复帧会被重新确认，但绝不重复交付。

use tracing::{debug, trace};

use super::frame::Payload;
use super::seq::{SeqNr, SeqSpace};
use super::UpperLayer;

/// 接收判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// 按序帧：已交付上层
    Delivered,
    /// 序号不匹配（重复或超前）：未交付，状态不变
    Rejected,
}

/// Go-Back-N 接收侧状态机。
#[derive(Debug)]
pub struct Receiver {
    space: SeqSpace,
    /// 期待的下一个按序帧
    frame_expected: SeqNr,
    /// 当前缺口是否已发过 NAK
    nak_sent: bool,
}

impl Receiver {
    pub fn new(space: SeqSpace) -> Receiver {
        Receiver {
            space,
            frame_expected: SeqNr(0),
            nak_sent: false,
        }
    }

    pub fn frame_expected(&self) -> SeqNr {
        self.frame_expected
    }

    /// 出站累计 ack（包含式）：`frame_expected` 之前的帧都已收到。
    pub fn ack_value(&self) -> SeqNr {
        let m = self.space.modulus() as u32;
        SeqNr(((self.frame_expected.0 as u32 + m - 1) % m) as u16)
    }

    /// 数据帧到达时的接受判定。只有 `frame_expected` 会推进状态。
    pub fn on_data(
        &mut self,
        seq: SeqNr,
        payload: Payload,
        upper: &mut dyn UpperLayer,
    ) -> Acceptance {
        if seq == self.frame_expected {
            upper.deliver(payload);
            self.frame_expected = self.space.inc(self.frame_expected);
            self.nak_sent = false;
            debug!(frame_expected = self.frame_expected.0, "按序交付");
            Acceptance::Delivered
        } else {
            trace!(
                seq = seq.0,
                expected = self.frame_expected.0,
                "序号不匹配，拒绝"
            );
            Acceptance::Rejected
        }
    }

    /// 针对当前缺口是否还允许发 NAK；调用即占用本次机会，缺口被
    /// 填上后重新放开。
    pub fn take_nak(&mut self) -> bool {
        if self.nak_sent {
            false
        } else {
            self.nak_sent = true;
            true
        }
    }
}
