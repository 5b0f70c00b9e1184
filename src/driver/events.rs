//! 驱动事件
//!
//! 三类事件源：上层就绪、帧到达、定时器触发。全部经仿真器的事件
//! 队列串行化，测试可以按需直接调度，精确编排“超时先于 ack 到达”
//! 这类交错。

use crate::proto::{Frame, SeqNr};
use crate::sim::{Event, Simulator, World};

use super::world::{ArqWorld, PeerId};

/// 事件：上层有数据可发，引擎尽量填满窗口。
#[derive(Debug)]
pub struct PumpUpper {
    pub peer: PeerId,
}

impl Event for PumpUpper {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<ArqWorld>()
            .expect("world must be ArqWorld");
        w.pump(self.peer, sim);
    }
}

/// 事件：一帧到达某端。
#[derive(Debug)]
pub struct FrameArrival {
    pub to: PeerId,
    pub frame: Frame,
}

impl Event for FrameArrival {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let FrameArrival { to, frame } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<ArqWorld>()
            .expect("world must be ArqWorld");
        w.on_frame_arrival(to, frame, sim);
    }
}

/// 事件：重传定时器触发。代号过期说明该定时器已被取消或替换，
/// 触发作废。
#[derive(Debug)]
pub struct TimerFired {
    pub peer: PeerId,
    pub seq: SeqNr,
    pub r#gen: u64,
}

impl Event for TimerFired {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TimerFired { peer, seq, r#gen } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<ArqWorld>()
            .expect("world must be ArqWorld");
        w.on_timer_fired(peer, seq, r#gen, sim);
    }
}
