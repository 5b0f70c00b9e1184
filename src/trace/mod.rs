//! 结构化协议轨迹（JSON 事件）
//!
//! 设计目标：
//! - **结构化**：测试与离线回放读事件，不解析文本日志
//! - **轻量**：纯内存 Vec，序列化交给 serde
//! - **可复盘**：每条事件带纳秒时间戳，能还原整个会话的交错

mod types;

pub use types::{TraceEvent, TraceEventKind, TraceFrameKind, TraceLogger};
