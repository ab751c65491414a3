//! Discrete tick sequencing for countdown/count-up timers.
//!
//! A [`TimerSequencer`] layers tick emission on top of the same
//! banked-elapsed arithmetic the animation clock uses. Ticks are due at
//! exact multiples of the interval; the host drains them each frame with
//! [`TimerSequencer::advance`], so a slow frame catches up by emitting
//! every missed tick rather than skipping any. The final tick lands at
//! exactly the total duration and the sequencer parks in `Done`.

use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors for sequencer operations invoked in the wrong state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    /// `pause` requires a ticking timer.
    #[error("pause ignored: no timer is ticking")]
    NotTicking,
    /// `resume` requires a paused timer.
    #[error("resume ignored: no timer is paused")]
    NotPaused,
    /// The timer already reached its total duration.
    #[error("ignored: the timer is done")]
    Done,
}

/// Wall-clock shape of one timer run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerSpec {
    /// Total duration the timer covers
    pub total: Duration,
    /// Spacing between ticks
    pub interval: Duration,
}

/// One emitted tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerTick {
    /// Elapsed running time at this tick (an exact interval multiple,
    /// or exactly the total for the final tick)
    pub elapsed: Duration,
    /// Running time left until the total
    pub remaining: Duration,
    /// Whether this tick reached the total duration
    pub is_final: bool,
}

/// Observable sequencer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Ticking,
    Paused,
    /// Terminal: no further ticks, pause/resume are rejected
    Done,
}

enum Phase {
    Idle,
    Ticking {
        spec: TimerSpec,
        segment_start: Instant,
        banked: Duration,
        emitted: u32,
    },
    Paused {
        spec: TimerSpec,
        banked: Duration,
        emitted: u32,
    },
    Done,
}

/// Tick emitter with pause/resume that never drifts.
///
/// States: `Idle -> Ticking -> {Paused <-> Ticking} -> Done`.
pub struct TimerSequencer {
    phase: Phase,
}

impl TimerSequencer {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn state(&self) -> TimerState {
        match self.phase {
            Phase::Idle => TimerState::Idle,
            Phase::Ticking { .. } => TimerState::Ticking,
            Phase::Paused { .. } => TimerState::Paused,
            Phase::Done => TimerState::Done,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.state() == TimerState::Ticking
    }

    pub fn is_done(&self) -> bool {
        self.state() == TimerState::Done
    }

    /// The active run's shape, if one was started and has not been
    /// replaced.
    pub fn spec(&self) -> Option<TimerSpec> {
        match &self.phase {
            Phase::Ticking { spec, .. } | Phase::Paused { spec, .. } => Some(*spec),
            _ => None,
        }
    }

    /// Elapsed time as of the last completed tick. Mid-interval progress
    /// is scheduling state, not reported time.
    pub fn elapsed_ticks(&self) -> Duration {
        match &self.phase {
            Phase::Ticking { spec, emitted, .. } | Phase::Paused { spec, emitted, .. } => {
                (spec.interval * *emitted).min(spec.total)
            }
            _ => Duration::ZERO,
        }
    }

    /// Begin a run of `total` duration ticking every `interval`,
    /// replacing any previous run. A non-positive interval degenerates to
    /// a single final tick at `total`.
    pub fn start(&mut self, now: Instant, total: Duration, interval: Duration) {
        let interval = if interval.is_zero() { total } else { interval };
        log::debug!("timer start: {:?} every {:?}", total, interval);
        self.phase = Phase::Ticking {
            spec: TimerSpec { total, interval },
            segment_start: now,
            banked: Duration::ZERO,
            emitted: 0,
        };
    }

    /// Emit every tick due by `now`, in strictly increasing elapsed
    /// order. The final tick is clamped to exactly the total; emitting it
    /// parks the sequencer in `Done`.
    pub fn advance(&mut self, now: Instant) -> Vec<TimerTick> {
        let (spec, elapsed, mut emitted) = match &self.phase {
            Phase::Ticking {
                spec,
                segment_start,
                banked,
                emitted,
            } => (
                *spec,
                *banked + now.saturating_duration_since(*segment_start),
                *emitted,
            ),
            _ => return Vec::new(),
        };

        let mut ticks = Vec::new();
        let mut done = false;
        loop {
            let target = (spec.interval * (emitted + 1)).min(spec.total);
            if elapsed < target {
                break;
            }
            emitted += 1;
            let is_final = target >= spec.total;
            ticks.push(TimerTick {
                elapsed: target,
                remaining: spec.total - target,
                is_final,
            });
            if is_final {
                done = true;
                break;
            }
        }

        if done {
            log::debug!("timer done after {} ticks", emitted);
            self.phase = Phase::Done;
        } else if let Phase::Ticking { emitted: e, .. } = &mut self.phase {
            *e = emitted;
        }
        ticks
    }

    /// Stop tick emission, preserving elapsed time.
    pub fn pause(&mut self, now: Instant) -> Result<(), TimerError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Ticking {
                spec,
                segment_start,
                banked,
                emitted,
            } => {
                self.phase = Phase::Paused {
                    spec,
                    banked: banked + now.saturating_duration_since(segment_start),
                    emitted,
                };
                Ok(())
            }
            Phase::Done => {
                self.phase = Phase::Done;
                Err(TimerError::Done)
            }
            other => {
                self.phase = other;
                Err(TimerError::NotTicking)
            }
        }
    }

    /// Resume tick emission. The interval that was in progress at pause
    /// time continues from its remaining portion, so ticks never drift.
    pub fn resume(&mut self, now: Instant) -> Result<(), TimerError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Paused {
                spec,
                banked,
                emitted,
            } => {
                self.phase = Phase::Ticking {
                    spec,
                    segment_start: now,
                    banked,
                    emitted,
                };
                Ok(())
            }
            Phase::Done => {
                self.phase = Phase::Done;
                Err(TimerError::Done)
            }
            other => {
                self.phase = other;
                Err(TimerError::NotPaused)
            }
        }
    }
}

impl Default for TimerSequencer {
    fn default() -> Self {
        Self::new()
    }
}
