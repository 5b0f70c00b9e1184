//! 会话组合根
//!
//! `ProtocolDriver` 按配置搭出完整会话：两个协议端点、两条单向
//! 信道（各自的故障计划）、两个时钟与上层应用，跑到会话收敛
//! （源耗尽且两端窗口排空）或截止时间，产出汇总报告。

use tracing::info;

use crate::link::{FaultPlan, Link, LinkStats, SimChannel};
use crate::proto::{ArqConfig, ArqEngine, ConfigError, Payload, SeqSpace};
use crate::sim::{SimTime, Simulator};
use crate::trace::{TraceEventKind, TraceLogger};

use super::app::TransferApp;
use super::clock::SimClock;
use super::events::PumpUpper;
use super::world::{ArqWorld, Peer, PeerId};

/// 链路参数（两个方向相同）
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub latency: SimTime,
    pub bandwidth_bps: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            latency: SimTime::from_micros(50),
            bandwidth_bps: 1_000_000_000,
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub arq: ArqConfig,
    pub link: LinkConfig,
    /// 0 -> 1 方向的故障计划
    pub faults_a_to_b: FaultPlan,
    /// 1 -> 0 方向的故障计划
    pub faults_b_to_a: FaultPlan,
    /// A 端要发送的负载
    pub payloads_a: Vec<Payload>,
    /// B 端要发送的负载
    pub payloads_b: Vec<Payload>,
    /// 是否记录结构化轨迹
    pub trace: bool,
    /// 仿真截止时间；None 表示跑到事件耗尽
    pub deadline: Option<SimTime>,
}

/// 会话汇总
#[derive(Debug)]
pub struct SessionReport {
    /// 会话是否收敛：源耗尽且两端窗口排空
    pub finished: bool,
    pub duration: SimTime,
    pub delivered_to_a: Vec<Payload>,
    pub delivered_to_b: Vec<Payload>,
    pub stats_a_to_b: LinkStats,
    pub stats_b_to_a: LinkStats,
    /// 会话期间观测到的在途帧数峰值
    pub max_in_flight: u16,
    pub trace: Option<TraceLogger>,
}

/// 组合根：一个会话一个驱动，互不共享状态。
pub struct ProtocolDriver {
    sim: Simulator,
    world: ArqWorld,
    deadline: Option<SimTime>,
}

impl ProtocolDriver {
    pub fn new(cfg: SessionConfig) -> Result<ProtocolDriver, ConfigError> {
        let SessionConfig {
            arq,
            link,
            faults_a_to_b,
            faults_b_to_a,
            payloads_a,
            payloads_b,
            trace: record_trace,
            deadline,
        } = cfg;
        arq.validate()?;
        let space = SeqSpace::new(arq.window_size)?;

        let make_peer = |payloads: Vec<Payload>, faults: FaultPlan| -> Result<Peer, ConfigError> {
            Ok(Peer {
                engine: ArqEngine::new(&arq)?,
                chan: SimChannel::new(Link::new(link.latency, link.bandwidth_bps), faults),
                clock: SimClock::new(arq.window_size),
                app: TransferApp::with_payloads(payloads),
            })
        };
        let peer_a = make_peer(payloads_a, faults_a_to_b)?;
        let peer_b = make_peer(payloads_b, faults_b_to_a)?;

        let mut trace = record_trace.then(TraceLogger::default);
        if let Some(t) = &mut trace {
            t.record(
                SimTime::ZERO,
                TraceEventKind::Meta {
                    window_size: arq.window_size,
                    max_seq: space.max_seq().0,
                    timeout_ns: arq.timeout.0,
                    nak_enabled: arq.nak_enabled,
                },
            );
        }

        let mut sim = Simulator::default();
        sim.schedule(SimTime::ZERO, PumpUpper { peer: PeerId(0) });
        sim.schedule(SimTime::ZERO, PumpUpper { peer: PeerId(1) });

        info!(
            window_size = arq.window_size,
            timeout_ns = arq.timeout.0,
            nak_enabled = arq.nak_enabled,
            "会话就绪"
        );

        Ok(ProtocolDriver {
            sim,
            world: ArqWorld::new([peer_a, peer_b], trace),
            deadline,
        })
    }

    /// 跑到事件耗尽或截止时间，产出会话汇总。
    pub fn run(mut self) -> SessionReport {
        match self.deadline {
            Some(d) => self.sim.run_until(d, &mut self.world),
            None => self.sim.run(&mut self.world),
        }

        let ArqWorld {
            peers,
            trace,
            max_in_flight,
        } = self.world;
        let [a, b] = peers;
        let finished = a.engine.is_drained()
            && b.engine.is_drained()
            && a.app.source_exhausted()
            && b.app.source_exhausted();

        SessionReport {
            finished,
            duration: self.sim.now(),
            delivered_to_a: a.app.received,
            delivered_to_b: b.app.received,
            stats_a_to_b: a.chan.stats,
            stats_b_to_a: b.chan.stats,
            max_in_flight,
            trace,
        }
    }
}
