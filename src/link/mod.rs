//! 仿真信道模块
//!
//! 单向链路的时序模型（传播时延 + 带宽串行化）、确定性故障注入
//! 计划与统计。协议侧只看到 `Channel` 接口。

mod channel;
mod faults;
mod link;
mod stats;

pub use channel::{SimChannel, TxRecord, FRAME_OVERHEAD_BYTES};
pub use faults::FaultPlan;
pub use link::Link;
pub use stats::LinkStats;
