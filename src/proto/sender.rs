//! 发送引擎
//!
//! 持有发送窗口与重传缓冲。submit 在窗口有空位时接纳新负载；
//! 累计 ack 覆盖多少在途帧就滑动多少；超时触发 go-back-N 整窗
//! 重传。副作用只经过 Channel / Clock 接口。

use tracing::{debug, trace};

use crate::sim::SimTime;

use super::error::WouldBlock;
use super::frame::{Frame, Payload};
use super::seq::{SeqNr, SeqSpace};
use super::{Channel, Clock, TimerHandle};

/// 重传缓冲槽位：负载、定时器句柄、是否重传过。
#[derive(Debug)]
struct Slot {
    payload: Payload,
    timer: TimerHandle,
    retransmitted: bool,
}

/// Go-Back-N 发送侧状态机。
///
/// 不变式：`next_frame_to_send = ack_expected + nbuffered (mod M)`；
/// 槽位恰好在其序列号落在 `[ack_expected, next_frame_to_send)`
/// 期间被占用。
#[derive(Debug)]
pub struct Sender {
    space: SeqSpace,
    timeout: SimTime,
    /// 最老的未确认帧
    ack_expected: SeqNr,
    /// 下一个要发送的序列号
    next_frame_to_send: SeqNr,
    /// 在途帧数
    nbuffered: u16,
    /// 按序列号直接索引的重传缓冲，槽位循环复用
    slots: Vec<Option<Slot>>,
}

impl Sender {
    pub fn new(space: SeqSpace, timeout: SimTime) -> Sender {
        let mut slots = Vec::with_capacity(space.modulus() as usize);
        slots.resize_with(space.modulus() as usize, || None);
        Sender {
            space,
            timeout,
            ack_expected: SeqNr(0),
            next_frame_to_send: SeqNr(0),
            nbuffered: 0,
            slots,
        }
    }

    /// 在途帧数上限：序列号空间共 M 个值，最多允许 M-1 帧在途。
    /// 整窗 M 帧都在途时，覆盖全窗的累计 ack 与陈旧的重复 ack 在
    /// 线上无法区分，窗口永远滑不动。
    pub fn max_in_flight(&self) -> u16 {
        self.space.modulus() - 1
    }

    pub fn can_accept(&self) -> bool {
        self.nbuffered < self.max_in_flight()
    }

    pub fn in_flight(&self) -> u16 {
        self.nbuffered
    }

    pub fn is_drained(&self) -> bool {
        self.nbuffered == 0
    }

    pub fn ack_expected(&self) -> SeqNr {
        self.ack_expected
    }

    pub fn next_frame_to_send(&self) -> SeqNr {
        self.next_frame_to_send
    }

    /// 接纳一个新负载：占用 `next_frame_to_send`，入缓冲、发帧、
    /// 挂定时器。窗口满时返回 `WouldBlock`，由调用方等窗口滑动后
    /// 重试，不会静默丢弃。
    pub fn submit(
        &mut self,
        payload: Payload,
        piggyback_ack: SeqNr,
        chan: &mut dyn Channel,
        clock: &mut dyn Clock,
    ) -> Result<SeqNr, WouldBlock> {
        if !self.can_accept() {
            return Err(WouldBlock);
        }
        let seq = self.next_frame_to_send;
        let timer = clock.arm(seq, self.timeout);
        chan.send(Frame::data(seq, piggyback_ack, payload.clone()));
        self.slots[seq.0 as usize] = Some(Slot {
            payload,
            timer,
            retransmitted: false,
        });
        self.nbuffered += 1;
        self.next_frame_to_send = self.space.inc(seq);
        debug!(seq = seq.0, in_flight = self.nbuffered, "数据帧入窗");
        Ok(seq)
    }

    /// 处理累计 ack：一个 ack 可以一次退掉多个在途帧。每退一帧
    /// 恰好取消一次它的定时器。重复或陈旧的 ack 落在窗口外，
    /// 循环一次都不进，等价于幂等空操作。
    pub fn process_ack(&mut self, ack: SeqNr, clock: &mut dyn Clock) -> u16 {
        let mut retired = 0;
        while self
            .space
            .between(self.ack_expected, ack, self.next_frame_to_send)
        {
            let slot = self.slots[self.ack_expected.0 as usize]
                .take()
                .expect("acked slot occupied");
            clock.cancel(slot.timer);
            self.nbuffered -= 1;
            retired += 1;
            trace!(seq = self.ack_expected.0, "帧已确认，释放槽位");
            self.ack_expected = self.space.inc(self.ack_expected);
        }
        if retired > 0 {
            debug!(
                retired,
                ack_expected = self.ack_expected.0,
                in_flight = self.nbuffered,
                "窗口滑动"
            );
        }
        retired
    }

    /// go-back-N：从 `ack_expected` 起按序重传全部在途帧，每帧换用
    /// 新定时器（替换旧的，不叠加）。
    pub fn resend_outstanding(
        &mut self,
        piggyback_ack: SeqNr,
        chan: &mut dyn Channel,
        clock: &mut dyn Clock,
    ) -> u16 {
        let mut seq = self.ack_expected;
        for _ in 0..self.nbuffered {
            let slot = self.slots[seq.0 as usize]
                .as_mut()
                .expect("outstanding slot occupied");
            slot.timer = clock.arm(seq, self.timeout);
            slot.retransmitted = true;
            chan.send(Frame {
                retransmit: true,
                ..Frame::data(seq, piggyback_ack, slot.payload.clone())
            });
            seq = self.space.inc(seq);
        }
        if self.nbuffered > 0 {
            debug!(
                from = self.ack_expected.0,
                count = self.nbuffered,
                "整窗重传"
            );
        }
        self.nbuffered
    }

    /// 超时：单个定时器触发即重传整个在途窗口，而不是只补那一帧。
    /// 窗口已空（陈旧触发）则为空操作。
    pub fn on_timeout(
        &mut self,
        seq: SeqNr,
        piggyback_ack: SeqNr,
        chan: &mut dyn Channel,
        clock: &mut dyn Clock,
    ) -> u16 {
        if self.nbuffered == 0 {
            return 0;
        }
        debug!(seq = seq.0, "重传定时器触发");
        self.resend_outstanding(piggyback_ack, chan, clock)
    }
}
