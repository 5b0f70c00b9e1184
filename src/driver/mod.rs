//! 组合根与事件驱动
//!
//! 把两个协议端点、两条单向信道、两个时钟与上层应用接到一个仿真
//! 器上；三类事件源（上层就绪、帧到达、定时器触发）经同一事件
//! 队列串行化，对引擎状态的每次操作天然原子。

mod app;
mod clock;
mod events;
mod session;
mod world;

pub use app::TransferApp;
pub use clock::{PendingTimer, SimClock};
pub use events::{FrameArrival, PumpUpper, TimerFired};
pub use session::{LinkConfig, ProtocolDriver, SessionConfig, SessionReport};
pub use world::{ArqWorld, Peer, PeerId};
