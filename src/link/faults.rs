//! 故障注入计划
//!
//! 按传输序号（0 起）确定性地丢弃 / 损坏 / 重复 / 追加延迟，
//! 测试可以精确编排“第几次传输坏在哪里”，同一计划跑多少遍结果
//! 都一样。不引入随机数。

use std::collections::{BTreeMap, BTreeSet};

use crate::sim::SimTime;

/// 一条单向链路的故障计划。
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    drop: BTreeSet<u64>,
    corrupt: BTreeSet<u64>,
    duplicate: BTreeSet<u64>,
    delay: BTreeMap<u64, SimTime>,
    /// 周期性丢包：每第 n 次传输丢一次
    drop_every: Option<u64>,
}

impl FaultPlan {
    /// 指定传输序号丢弃
    pub fn drop_at(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.drop.extend(ids);
        self
    }

    /// 指定传输序号损坏（checksum_ok 置 false）
    pub fn corrupt_at(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.corrupt.extend(ids);
        self
    }

    /// 指定传输序号重复投递一次
    pub fn duplicate_at(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.duplicate.extend(ids);
        self
    }

    /// 指定传输序号追加到达延迟（可用于构造乱序）
    pub fn delay_at(mut self, id: u64, extra: SimTime) -> Self {
        self.delay.insert(id, extra);
        self
    }

    /// 周期性丢包：每第 n 次传输丢一次（n = 0 视为关闭）
    pub fn drop_every(mut self, n: u64) -> Self {
        self.drop_every = (n > 0).then_some(n);
        self
    }

    pub fn should_drop(&self, tx_id: u64) -> bool {
        self.drop.contains(&tx_id) || self.drop_every.is_some_and(|n| tx_id % n == n - 1)
    }

    pub fn should_corrupt(&self, tx_id: u64) -> bool {
        self.corrupt.contains(&tx_id)
    }

    pub fn should_duplicate(&self, tx_id: u64) -> bool {
        self.duplicate.contains(&tx_id)
    }

    pub fn extra_delay(&self, tx_id: u64) -> Option<SimTime> {
        self.delay.get(&tx_id).copied()
    }
}
