pub mod animation;
pub mod events;
pub mod geometry;
pub mod label;
pub mod lifecycle;
pub mod render;
pub mod style;
pub mod timer;
pub mod widgets;

pub mod prelude {
    pub use crate::animation::{
        AnimationClock, AnimationSpec, ClockError, ClockState, TimingFunction, Transition,
    };
    pub use crate::events::{RingEvent, SubscriptionId};
    pub use crate::geometry::{ArcSpan, RingMetrics};
    pub use crate::label::LabelFormat;
    pub use crate::lifecycle::LifecycleCoordinator;
    pub use crate::render::{DrawCommand, PaintContext, StrokeCap};
    pub use crate::style::{GradientOptions, KnobStyle, LabelStyle, RingConfig, RingStyle};
    pub use crate::timer::{TimerError, TimerSequencer, TimerSpec, TimerState, TimerTick};
    pub use crate::widgets::{ring, ChangeFlags, Color, ProgressRing, Rect, RingValue};
}
