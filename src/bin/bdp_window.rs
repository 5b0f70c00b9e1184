//! 带宽时延积窗口推荐
//!
//! 按 1 + 2 * ceil(带宽 × 单向时延 / 帧长) 给出发送窗口推荐值。
//! 纯计算，不跑仿真。

use clap::Parser;
use gbnsim_rs::proto::recommended_window_size;
use gbnsim_rs::sim::SimTime;

#[derive(Debug, Parser)]
#[command(name = "bdp-window", about = "按带宽时延积推荐 Go-Back-N 窗口大小")]
struct Args {
    /// 链路带宽（bps）
    #[arg(long)]
    bandwidth_bps: u64,

    /// 单向传播时延（微秒）
    #[arg(long)]
    delay_us: u64,

    /// 帧长（比特）
    #[arg(long, default_value_t = 8192)]
    frame_bits: u64,
}

fn main() {
    let args = Args::parse();
    let w = recommended_window_size(
        args.bandwidth_bps,
        SimTime::from_micros(args.delay_us),
        args.frame_bits,
    );
    println!("recommended window_size = {w} (max_seq = {})", w - 1);
}
