//! 仿真时钟
//!
//! 协议侧 `Clock` 接口的仿真实现。每个序列号至多一个在役定时器
//! 代号：arm 替换旧定时器，cancel 使其失效；触发事件带着代号
//! 回来，代号过期即忽略。保证每次 arm 至多触发一次，定时器可以
//! 真正被取消，而不是挂起后必然自燃。

use tracing::trace;

use crate::proto::{Clock, SeqNr, TimerHandle};
use crate::sim::SimTime;

/// 待调度的触发（相对时长，驱动层换算绝对时刻）
#[derive(Debug, Clone, Copy)]
pub struct PendingTimer {
    pub seq: SeqNr,
    pub r#gen: u64,
    pub after: SimTime,
}

/// 一个端点的重传时钟。
#[derive(Debug)]
pub struct SimClock {
    /// 每个序列号的在役代号；None 表示无定时器
    live: Vec<Option<u64>>,
    next_gen: u64,
    pending: Vec<PendingTimer>,
}

impl SimClock {
    pub fn new(window_size: usize) -> SimClock {
        SimClock {
            live: vec![None; window_size],
            next_gen: 0,
            pending: Vec::new(),
        }
    }

    /// 该代号是否仍在役
    pub fn is_live(&self, seq: SeqNr, r#gen: u64) -> bool {
        self.live[seq.0 as usize] == Some(r#gen)
    }

    /// 触发后注销，保证同一次 arm 不会触发第二次
    pub fn expire(&mut self, seq: SeqNr, r#gen: u64) {
        if self.is_live(seq, r#gen) {
            self.live[seq.0 as usize] = None;
        }
    }

    /// 在役定时器个数
    pub fn live_timers(&self) -> usize {
        self.live.iter().flatten().count()
    }

    /// 取走待调度的触发
    pub fn drain(&mut self) -> Vec<PendingTimer> {
        std::mem::take(&mut self.pending)
    }
}

impl Clock for SimClock {
    fn arm(&mut self, seq: SeqNr, after: SimTime) -> TimerHandle {
        let r#gen = self.next_gen;
        self.next_gen += 1;
        self.live[seq.0 as usize] = Some(r#gen);
        self.pending.push(PendingTimer { seq, r#gen, after });
        trace!(seq = seq.0, r#gen, "定时器挂起");
        TimerHandle { seq, r#gen }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.is_live(handle.seq, handle.r#gen) {
            self.live[handle.seq.0 as usize] = None;
            trace!(seq = handle.seq.0, r#gen = handle.r#gen, "定时器取消");
        }
    }
}
