mod animatable;
mod clock;
mod timing;

pub use animatable::Animatable;
pub use clock::{
    Advance, AnimationClock, AnimationSpec, ClockError, ClockSnapshot, ClockState, Completion,
    StartOutcome,
};
pub use timing::TimingFunction;

use std::time::Duration;

/// Configuration for how the ring value should animate when redirected
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation
    pub duration: Duration,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration: Duration, timing: TimingFunction) -> Self {
        Self { duration, timing }
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    /// Default transition eases in and out over 300ms
    fn default() -> Self {
        Self::new(Duration::from_millis(300), TimingFunction::EaseInOut)
    }
}
