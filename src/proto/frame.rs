//! 帧类型
//!
//! 每次发送尝试构造一个新帧，由信道消费。`ack` 字段是包含式的
//! 累计确认：`ack = frame_expected - 1 (mod M)`，语义是
//! “frame_expected 之前的帧我都收到了”。

use super::seq::SeqNr;

/// 上层负载字节。
pub type Payload = Vec<u8>;

/// 帧类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// 数据帧（捎带累计 ack）
    Data,
    /// 裸确认帧：无数据可捎带时补发
    Ack,
    /// 否定确认：请求对端在超时之前提前重传
    Nak,
}

/// 链路帧
#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    /// 序列号；仅数据帧有意义，控制帧固定为 0
    pub seq: SeqNr,
    /// 捎带的累计确认（包含式）
    pub ack: SeqNr,
    pub payload: Payload,
    /// 校验和是否有效；信道注入损坏时置 false
    pub checksum_ok: bool,
    /// 是否为重传帧
    pub retransmit: bool,
}

impl Frame {
    pub fn data(seq: SeqNr, ack: SeqNr, payload: Payload) -> Frame {
        Frame {
            kind: FrameKind::Data,
            seq,
            ack,
            payload,
            checksum_ok: true,
            retransmit: false,
        }
    }

    pub fn bare_ack(ack: SeqNr) -> Frame {
        Frame {
            kind: FrameKind::Ack,
            seq: SeqNr(0),
            ack,
            payload: Vec::new(),
            checksum_ok: true,
            retransmit: false,
        }
    }

    pub fn nak(ack: SeqNr) -> Frame {
        Frame {
            kind: FrameKind::Nak,
            ..Frame::bare_ack(ack)
        }
    }
}
