//! 全双工 ARQ 引擎
//!
//! 把发送状态机与接收状态机组合成一条链路某端的完整协议端点：
//! 入站数据帧交接收侧判定，捎带的 ack 交发送侧滑窗，出站数据帧
//! 捎带当前累计 ack；没有数据可捎带时立即补发裸 ack（或 NAK）。

use tracing::debug;

use super::config::ArqConfig;
use super::error::ConfigError;
use super::frame::{Frame, FrameKind};
use super::receiver::{Acceptance, Receiver};
use super::sender::Sender;
use super::seq::{SeqNr, SeqSpace};
use super::{Channel, Clock, UpperLayer};

/// 一次帧到达处理的摘要，供驱动层记录轨迹/统计，引擎自身不持有
/// 轨迹。
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrivalOutcome {
    /// 向上层交付了负载
    pub delivered: bool,
    /// 数据帧被拒绝（重复或超前）
    pub rejected: bool,
    /// 校验和无效，帧被丢弃
    pub corrupt: bool,
    /// 本次 ack 滑过的帧数
    pub retired: u16,
    /// NAK 触发的快速重传帧数
    pub fast_resent: u16,
    /// pump 新发出的数据帧数
    pub pumped: u16,
    /// 补发了裸 ack
    pub acked_back: bool,
    /// 发出了 NAK
    pub nak_back: bool,
}

/// 一条链路某端的协议端点。
pub struct ArqEngine {
    sender: Sender,
    receiver: Receiver,
    nak_enabled: bool,
}

impl ArqEngine {
    pub fn new(cfg: &ArqConfig) -> Result<ArqEngine, ConfigError> {
        cfg.validate()?;
        let space = SeqSpace::new(cfg.window_size)?;
        Ok(ArqEngine {
            sender: Sender::new(space, cfg.timeout),
            receiver: Receiver::new(space),
            nak_enabled: cfg.nak_enabled,
        })
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    /// 发送窗口已排空
    pub fn is_drained(&self) -> bool {
        self.sender.is_drained()
    }

    /// 窗口有空位就从上层拉取负载发出，返回新发帧数。出站数据帧
    /// 捎带当前累计 ack。
    pub fn pump(
        &mut self,
        upper: &mut dyn UpperLayer,
        chan: &mut dyn Channel,
        clock: &mut dyn Clock,
    ) -> u16 {
        let mut sent = 0;
        while self.sender.can_accept() {
            let Some(payload) = upper.next_packet() else {
                break;
            };
            let ack = self.receiver.ack_value();
            self.sender
                .submit(payload, ack, chan, clock)
                .expect("window has room");
            sent += 1;
        }
        sent
    }

    /// 帧到达。处理顺序：
    /// 1. 校验和无效的帧直接丢弃，不发 NAK，靠对端超时恢复；
    /// 2. 数据帧交接收侧判定（按序交付 / 拒绝）；
    /// 3. 所有帧都携带累计 ack，交发送侧滑窗；
    /// 4. NAK 帧触发整窗快速重传；
    /// 5. pump 补满窗口；若入站是数据帧而本端无数据可捎带，补发
    ///    裸 ack（拒绝且允许 NAK 时改发 NAK）。
    pub fn on_frame_arrival(
        &mut self,
        frame: Frame,
        chan: &mut dyn Channel,
        clock: &mut dyn Clock,
        upper: &mut dyn UpperLayer,
    ) -> ArrivalOutcome {
        let mut out = ArrivalOutcome::default();
        let Frame {
            kind,
            seq,
            ack,
            payload,
            checksum_ok,
            ..
        } = frame;

        if !checksum_ok {
            debug!(?kind, seq = seq.0, "校验和无效，丢弃");
            out.corrupt = true;
            return out;
        }

        let mut data_rejected = false;
        if kind == FrameKind::Data {
            match self.receiver.on_data(seq, payload, upper) {
                Acceptance::Delivered => out.delivered = true,
                Acceptance::Rejected => {
                    out.rejected = true;
                    data_rejected = true;
                }
            }
        }

        out.retired = self.sender.process_ack(ack, clock);

        if kind == FrameKind::Nak {
            // 对端在催：不等超时，立即整窗重传
            out.fast_resent = self
                .sender
                .resend_outstanding(self.receiver.ack_value(), chan, clock);
        }

        out.pumped = self.pump(upper, chan, clock);

        if kind == FrameKind::Data && out.pumped == 0 {
            // 没有数据帧可捎带，立即补发确认
            if data_rejected && self.nak_enabled && self.receiver.take_nak() {
                chan.send(Frame::nak(self.receiver.ack_value()));
                out.nak_back = true;
            } else {
                chan.send(Frame::bare_ack(self.receiver.ack_value()));
                out.acked_back = true;
            }
        }
        out
    }

    /// 重传定时器触发：go-back-N 整窗重传。
    pub fn on_timeout(
        &mut self,
        seq: SeqNr,
        chan: &mut dyn Channel,
        clock: &mut dyn Clock,
    ) -> u16 {
        self.sender
            .on_timeout(seq, self.receiver.ack_value(), chan, clock)
    }
}
