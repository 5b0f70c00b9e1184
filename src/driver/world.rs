//! ARQ 仿真世界
//!
//! 持有两个对等端（引擎 + 出向信道 + 本端时钟 + 上层应用）。
//! 每次引擎调用结束后统一冲刷发件箱与待挂定时器，转成后续事件；
//! 引擎本身看不到仿真器。

use std::any::Any;

use tracing::{debug, info, trace};

use crate::link::SimChannel;
use crate::proto::{ArqEngine, Frame, FrameKind, SeqNr};
use crate::sim::{Simulator, World};
use crate::trace::{TraceEventKind, TraceLogger};

use super::app::TransferApp;
use super::clock::SimClock;
use super::events::{FrameArrival, TimerFired};

/// 对等端编号（0 或 1）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerId(pub usize);

impl PeerId {
    /// 链路对端
    pub fn other(self) -> PeerId {
        PeerId(1 - self.0)
    }
}

/// 一个对等端：协议端点 + 出向信道 + 本端时钟 + 上层应用。
pub struct Peer {
    pub engine: ArqEngine,
    pub chan: SimChannel,
    pub clock: SimClock,
    pub app: TransferApp,
}

/// 仿真世界：一条链路两端的会话。
pub struct ArqWorld {
    pub peers: [Peer; 2],
    pub trace: Option<TraceLogger>,
    /// 会话期间观测到的在途帧数峰值
    pub max_in_flight: u16,
}

impl World for ArqWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        let peak = self
            .peers
            .iter()
            .map(|p| p.engine.sender().in_flight())
            .max()
            .unwrap_or(0);
        self.max_in_flight = self.max_in_flight.max(peak);
    }
}

impl ArqWorld {
    pub fn new(peers: [Peer; 2], trace: Option<TraceLogger>) -> ArqWorld {
        ArqWorld {
            peers,
            trace,
            max_in_flight: 0,
        }
    }

    /// 上层就绪：尽量填满发送窗口。
    pub fn pump(&mut self, id: PeerId, sim: &mut Simulator) {
        let p = &mut self.peers[id.0];
        let sent = p.engine.pump(&mut p.app, &mut p.chan, &mut p.clock);
        if sent > 0 {
            debug!(peer = id.0, sent, "窗口补帧");
        }
        self.flush(id, sim);
    }

    /// 一帧到达 `id` 端。
    pub fn on_frame_arrival(&mut self, id: PeerId, frame: Frame, sim: &mut Simulator) {
        let (kind, seq, ack, corrupt) = (frame.kind, frame.seq, frame.ack, !frame.checksum_ok);

        let p = &mut self.peers[id.0];
        let outcome = p
            .engine
            .on_frame_arrival(frame, &mut p.chan, &mut p.clock, &mut p.app);
        let ack_expected = p.engine.sender().ack_expected();
        let in_flight = p.engine.sender().in_flight();
        let expected = p.engine.receiver().frame_expected();

        if let Some(t) = &mut self.trace {
            let now = sim.now();
            t.record(
                now,
                TraceEventKind::FrameArrival {
                    peer: id.0,
                    frame: kind.into(),
                    seq: seq.0,
                    ack: ack.0,
                    corrupt,
                },
            );
            if outcome.delivered {
                t.record(now, TraceEventKind::Deliver { peer: id.0, seq: seq.0 });
            }
            if outcome.rejected {
                t.record(
                    now,
                    TraceEventKind::Reject {
                        peer: id.0,
                        seq: seq.0,
                        expected: expected.0,
                    },
                );
            }
            if outcome.retired > 0 {
                t.record(
                    now,
                    TraceEventKind::WindowSlide {
                        peer: id.0,
                        retired: outcome.retired,
                        ack_expected: ack_expected.0,
                        in_flight,
                    },
                );
            }
        }
        self.flush(id, sim);
    }

    /// 重传定时器触发。
    pub fn on_timer_fired(&mut self, id: PeerId, seq: SeqNr, r#gen: u64, sim: &mut Simulator) {
        let p = &mut self.peers[id.0];
        if !p.clock.is_live(seq, r#gen) {
            trace!(peer = id.0, seq = seq.0, r#gen, "定时器代号过期，忽略");
            return;
        }
        p.clock.expire(seq, r#gen);
        info!(peer = id.0, seq = seq.0, "⏰ 超时，go-back-N 重传");

        let resent = p.engine.on_timeout(seq, &mut p.chan, &mut p.clock);

        if let Some(t) = &mut self.trace {
            t.record(
                sim.now(),
                TraceEventKind::Timeout {
                    peer: id.0,
                    seq: seq.0,
                    resent,
                },
            );
        }
        self.flush(id, sim);
    }

    /// 冲刷 `id` 端：发件箱 → 帧到达事件（套故障与链路时序）；
    /// 待挂定时器 → 触发事件。
    fn flush(&mut self, id: PeerId, sim: &mut Simulator) {
        let now = sim.now();

        let records = self.peers[id.0].chan.drain(now);
        for rec in records {
            if let Some(t) = &mut self.trace {
                let send = match rec.frame.kind {
                    FrameKind::Data => TraceEventKind::SendData {
                        peer: id.0,
                        seq: rec.frame.seq.0,
                        ack: rec.frame.ack.0,
                        retransmit: rec.frame.retransmit,
                        tx_id: rec.tx_id,
                    },
                    FrameKind::Ack => TraceEventKind::SendAck {
                        peer: id.0,
                        ack: rec.frame.ack.0,
                        tx_id: rec.tx_id,
                    },
                    FrameKind::Nak => TraceEventKind::SendNak {
                        peer: id.0,
                        ack: rec.frame.ack.0,
                        tx_id: rec.tx_id,
                    },
                };
                t.record(now, send);
                if rec.corrupted {
                    t.record(
                        now,
                        TraceEventKind::ChannelCorrupt {
                            peer: id.0,
                            tx_id: rec.tx_id,
                        },
                    );
                }
                if rec.arrivals.is_empty() {
                    t.record(
                        now,
                        TraceEventKind::ChannelDrop {
                            peer: id.0,
                            tx_id: rec.tx_id,
                        },
                    );
                } else if rec.arrivals.len() > 1 {
                    t.record(
                        now,
                        TraceEventKind::ChannelDuplicate {
                            peer: id.0,
                            tx_id: rec.tx_id,
                        },
                    );
                }
            }
            for arrive in &rec.arrivals {
                sim.schedule(
                    *arrive,
                    FrameArrival {
                        to: id.other(),
                        frame: rec.frame.clone(),
                    },
                );
            }
        }

        for timer in self.peers[id.0].clock.drain() {
            sim.schedule(
                now.saturating_add(timer.after),
                TimerFired {
                    peer: id,
                    seq: timer.seq,
                    r#gen: timer.r#gen,
                },
            );
        }
    }
}
