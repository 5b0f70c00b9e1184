//! 协议错误类型
//!
//! 只有配置错误是致命的，且只出现在构造期；窗口满返回
//! `WouldBlock`，由调用方等窗口滑动后重试。校验和错误与序号
//! 不匹配在协议内部恢复，不会作为错误上抛给上层。

use thiserror::Error;

/// 配置错误：构造期校验失败，运行期不会出现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("window size {window_size} too small, need at least 2")]
    WindowTooSmall { window_size: usize },
    #[error("window size {window_size} exceeds sequence space limit {max}")]
    WindowTooLarge { window_size: usize, max: usize },
    #[error("retransmit timeout must be non-zero")]
    ZeroTimeout,
}

/// 发送窗口已满：submit 被拒绝（不会静默丢弃），等窗口滑动后重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("send window full")]
pub struct WouldBlock;
