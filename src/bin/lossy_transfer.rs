//! 有损信道上的 Go-Back-N 传输实验
//!
//! 两个对等端经一对单向链路互发；A 端发送 --frames 个负载，B 端
//! 负责确认。故障按传输序号确定性注入，同一条命令行跑多少遍结果
//! 都一样。

use clap::Parser;
use gbnsim_rs::driver::{LinkConfig, ProtocolDriver, SessionConfig};
use gbnsim_rs::link::FaultPlan;
use gbnsim_rs::proto::ArqConfig;
use gbnsim_rs::sim::SimTime;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lossy-transfer",
    about = "Go-Back-N 仿真：A->B 定量传输（确定性故障注入）"
)]
struct Args {
    /// 要发送的负载个数
    #[arg(long, default_value_t = 32)]
    frames: u64,

    /// 每个负载的字节数
    #[arg(long, default_value_t = 256)]
    payload_bytes: usize,

    /// 发送窗口大小（序列号空间大小；在途上限为 window_size - 1）
    #[arg(long, default_value_t = 8)]
    window_size: usize,

    /// 重传超时（微秒）
    #[arg(long, default_value_t = 500)]
    timeout_us: u64,

    /// 单向链路传播时延（微秒）
    #[arg(long, default_value_t = 50)]
    link_latency_us: u64,

    /// 链路带宽（Mbps）
    #[arg(long, default_value_t = 100)]
    bandwidth_mbps: u64,

    /// 序号不匹配时发 NAK，提前触发对端重传
    #[arg(long, default_value_t = false)]
    nak: bool,

    /// A->B 方向按传输序号丢弃（逗号分隔，0 起）
    #[arg(long, value_delimiter = ',')]
    drop: Vec<u64>,

    /// A->B 方向按传输序号损坏
    #[arg(long, value_delimiter = ',')]
    corrupt: Vec<u64>,

    /// A->B 方向按传输序号重复投递
    #[arg(long, value_delimiter = ',')]
    duplicate: Vec<u64>,

    /// A->B 方向周期性丢包：每第 n 次传输丢一次
    #[arg(long)]
    drop_every: Option<u64>,

    /// B->A 方向按传输序号丢弃（用于丢 ack）
    #[arg(long, value_delimiter = ',')]
    drop_ack: Vec<u64>,

    /// 仿真截止时间（毫秒）
    #[arg(long, default_value_t = 10_000)]
    until_ms: u64,

    /// 输出轨迹 JSON 事件文件；不填则不生成
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let payloads: Vec<Vec<u8>> = (0..args.frames)
        .map(|i| vec![(i % 251) as u8; args.payload_bytes])
        .collect();

    let mut faults = FaultPlan::default()
        .drop_at(args.drop)
        .corrupt_at(args.corrupt)
        .duplicate_at(args.duplicate);
    if let Some(n) = args.drop_every {
        faults = faults.drop_every(n);
    }

    let cfg = SessionConfig {
        arq: ArqConfig {
            window_size: args.window_size,
            timeout: SimTime::from_micros(args.timeout_us),
            nak_enabled: args.nak,
        },
        link: LinkConfig {
            latency: SimTime::from_micros(args.link_latency_us),
            bandwidth_bps: args.bandwidth_mbps.saturating_mul(1_000_000),
        },
        faults_a_to_b: faults,
        faults_b_to_a: FaultPlan::default().drop_at(args.drop_ack),
        payloads_a: payloads.clone(),
        payloads_b: Vec::new(),
        trace: args.trace_json.is_some(),
        deadline: Some(SimTime::from_millis(args.until_ms)),
    };

    let driver = ProtocolDriver::new(cfg).expect("session config valid");
    let report = driver.run();

    if let Some(path) = args.trace_json {
        if let Some(t) = &report.trace {
            let json = serde_json::to_string_pretty(&t.events).expect("serialize trace events");
            fs::write(&path, json).expect("write trace json");
            eprintln!("wrote trace events to {}", path.display());
        }
    }

    let in_order = report.delivered_to_b == payloads;
    println!(
        "done @ {:?}\n  arq: delivered={}/{}, in_order={}, finished={}, max_in_flight={}\n  link a->b: sent={}, dropped={}, corrupted={}, duplicated={}\n  link b->a: sent={}, dropped={}",
        report.duration,
        report.delivered_to_b.len(),
        args.frames,
        in_order,
        report.finished,
        report.max_in_flight,
        report.stats_a_to_b.sent_frames,
        report.stats_a_to_b.dropped_frames,
        report.stats_a_to_b.corrupted_frames,
        report.stats_a_to_b.duplicated_frames,
        report.stats_b_to_a.sent_frames,
        report.stats_b_to_a.dropped_frames,
    );
}
