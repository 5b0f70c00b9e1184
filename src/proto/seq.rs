//! 序列号空间
//!
//! 序列号在 `[0, MAX_SEQ]` 上循环，所有运算都按模 `MAX_SEQ + 1`
//! 进行。模数由窗口大小决定并在构造时一次性校验，运行期不会再
//! 出现非法模数。

use std::fmt;

use super::error::ConfigError;

/// 序列号，取值 `[0, MAX_SEQ]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SeqNr(pub u16);

impl fmt::Display for SeqNr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 序列号空间：固定模数上的循环运算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqSpace {
    modulus: u16,
}

impl SeqSpace {
    /// 由窗口大小构造：`MAX_SEQ = window_size - 1`，模数 `MAX_SEQ + 1`。
    pub fn new(window_size: usize) -> Result<SeqSpace, ConfigError> {
        if window_size < 2 {
            return Err(ConfigError::WindowTooSmall { window_size });
        }
        if window_size > u16::MAX as usize {
            return Err(ConfigError::WindowTooLarge {
                window_size,
                max: u16::MAX as usize,
            });
        }
        Ok(SeqSpace {
            modulus: window_size as u16,
        })
    }

    pub fn modulus(&self) -> u16 {
        self.modulus
    }

    pub fn max_seq(&self) -> SeqNr {
        SeqNr(self.modulus - 1)
    }

    /// k 的循环后继
    pub fn inc(&self, k: SeqNr) -> SeqNr {
        SeqNr((k.0 + 1) % self.modulus)
    }

    /// 从 a 走到 b（不含 b）需要多少步
    pub fn distance(&self, a: SeqNr, b: SeqNr) -> u16 {
        // 加宽到 u32 再取模，避免大窗口下的加法回绕
        ((b.0 as u32 + self.modulus as u32 - a.0 as u32) % self.modulus as u32) as u16
    }

    /// b 是否落在循环区间 `[a, c)` 内；`a == c` 视为空区间。
    ///
    /// 用于判断一个累计 ack 是否覆盖某个在途帧，回绕后不会重复
    /// 计数。
    pub fn between(&self, a: SeqNr, b: SeqNr, c: SeqNr) -> bool {
        let (a, b, c) = (a.0, b.0, c.0);
        (a <= b && b < c) || (c < a && a <= b) || (b < c && c < a)
    }
}
