//! 仿真核心模块
//!
//! 事件驱动仿真的核心组件：仿真时间、事件、世界和仿真器。
//! 协议的三类事件源（上层就绪、帧到达、定时器触发）都经由同一个
//! 事件队列串行化执行。

// 子模块声明
mod event;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
