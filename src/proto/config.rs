//! 协议配置
//!
//! 每个会话持有自己的配置；构造期校验，运行期只读。没有任何
//! 跨会话的全局可变状态。

use crate::sim::SimTime;

use super::error::ConfigError;
use super::seq::SeqSpace;

/// Go-Back-N 会话配置
#[derive(Debug, Clone)]
pub struct ArqConfig {
    /// 窗口大小，决定序列号空间：`MAX_SEQ = window_size - 1`
    pub window_size: usize,
    /// 重传超时
    pub timeout: SimTime,
    /// 序号不匹配时是否发 NAK 提前触发重传
    pub nak_enabled: bool,
}

impl Default for ArqConfig {
    fn default() -> Self {
        Self {
            window_size: 8,
            timeout: SimTime::from_millis(200),
            nak_enabled: false,
        }
    }
}

impl ArqConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        SeqSpace::new(self.window_size)?;
        if self.timeout == SimTime::ZERO {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// 按带宽时延积推荐窗口大小：`1 + 2 * ceil(bandwidth * delay / frame_size)`。
///
/// 纯函数，不属于协议状态；结果夹在合法窗口范围内。
pub fn recommended_window_size(bandwidth_bps: u64, delay: SimTime, frame_bits: u64) -> usize {
    if bandwidth_bps == 0 || frame_bits == 0 {
        return 2;
    }
    // ceil(bps * delay_ns / (1e9 * frame_bits))，整数运算避免精度损失
    let num = (bandwidth_bps as u128).saturating_mul(delay.0 as u128);
    let den = (frame_bits as u128).saturating_mul(1_000_000_000);
    let frames = (num + den - 1) / den;
    let w = 1 + 2 * frames;
    w.clamp(2, u16::MAX as u128) as usize
}
