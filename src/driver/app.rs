//! 脚本化上层应用
//!
//! 发送侧从给定负载序列依次拉取；接收侧记录交付顺序，供断言与
//! 汇总使用。

use std::collections::VecDeque;

use tracing::debug;

use crate::proto::{Payload, UpperLayer};

/// 一端的上层：待发队列 + 已收列表。
#[derive(Debug, Default)]
pub struct TransferApp {
    to_send: VecDeque<Payload>,
    pub received: Vec<Payload>,
}

impl TransferApp {
    pub fn with_payloads(payloads: impl IntoIterator<Item = Payload>) -> TransferApp {
        TransferApp {
            to_send: payloads.into_iter().collect(),
            received: Vec::new(),
        }
    }

    /// 待发队列已空
    pub fn source_exhausted(&self) -> bool {
        self.to_send.is_empty()
    }
}

impl UpperLayer for TransferApp {
    fn next_packet(&mut self) -> Option<Payload> {
        self.to_send.pop_front()
    }

    fn deliver(&mut self, payload: Payload) {
        debug!(
            len = payload.len(),
            total = self.received.len() + 1,
            "负载交付上层"
        );
        self.received.push(payload);
    }
}
