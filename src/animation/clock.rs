//! Timed-value controller driving ring value transitions.
//!
//! The clock owns at most one in-flight [`AnimationSpec`] and interpolates
//! the ring value toward its target as a function of *running* time. Time
//! never advances on its own: every operation takes `now` explicitly and
//! the host refresh loop calls [`AnimationClock::advance`] each frame.
//! Pausing banks the elapsed running time; resuming restarts the segment
//! from `now`, so the total running time until completion always equals
//! the configured duration no matter how long the pause lasted.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::{Animatable, Transition};

/// Callback invoked exactly once when a transition reaches its target.
pub type Completion = Box<dyn FnOnce()>;

/// Errors for clock operations invoked in the wrong state.
///
/// Callers that treat misuse as harmless log these and move on; the clock
/// itself never panics on them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    /// `pause` requires a running animation.
    #[error("pause ignored: no animation is running")]
    NotRunning,
    /// `resume` requires a paused animation.
    #[error("resume ignored: no animation is paused")]
    NotPaused,
}

/// One in-flight transition between two values.
#[derive(Clone, Debug)]
pub struct AnimationSpec {
    /// Value the transition started from
    pub from: f32,
    /// Target value
    pub to: f32,
    /// Duration and timing curve
    pub transition: Transition,
}

impl AnimationSpec {
    fn value_at_elapsed(&self, elapsed: Duration) -> f32 {
        let duration = self.transition.duration;
        if elapsed >= duration {
            // Settled: the target wins regardless of curve overshoot
            return self.to;
        }
        let t = elapsed.as_secs_f32() / duration.as_secs_f32();
        let eased = self.transition.timing.evaluate(t);
        f32::lerp(&self.from, &self.to, eased)
    }
}

/// Observable clock state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    /// No active spec (also the completed state)
    Idle,
    /// A spec is being driven forward
    Running,
    /// Elapsed time is frozen
    Paused,
}

struct Active {
    spec: AnimationSpec,
    completion: Option<Completion>,
}

enum Phase {
    Idle,
    Running {
        active: Active,
        /// Start of the current uninterrupted running segment
        segment_start: Instant,
        /// Running time accumulated before the current segment
        banked: Duration,
    },
    Paused {
        active: Active,
        banked: Duration,
    },
}

/// Result of arming a new transition.
pub enum StartOutcome {
    /// The transition is armed; [`AnimationClock::advance`] drives it.
    Started {
        /// Resolved starting value (the in-flight value when redirecting)
        from: f32,
    },
    /// Zero or negative duration: the value jumped straight to the target.
    /// The caller applies `value` and then invokes `completion`, so no
    /// running state is ever observable.
    Jumped {
        value: f32,
        completion: Option<Completion>,
    },
}

/// Result of advancing the clock by one frame.
pub enum Advance {
    /// Nothing to do (idle or paused)
    NoChange,
    /// The interpolated value moved
    Changed(f32),
    /// The transition crossed its deadline this frame
    Finished {
        value: f32,
        completion: Option<Completion>,
    },
}

/// Frozen capture of a running transition, taken when the host suspends.
///
/// Opaque outside this module; the lifecycle coordinator holds at most one
/// and reinstalls it exactly once.
pub struct ClockSnapshot {
    active: Active,
    elapsed: Duration,
}

/// A pausable, resumable, cancellable interpolation driver.
///
/// States: `Idle -> Running -> {Paused <-> Running} -> Idle`. Completion
/// and idle are the same state: no active spec.
pub struct AnimationClock {
    phase: Phase,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn state(&self) -> ClockState {
        match self.phase {
            Phase::Idle => ClockState::Idle,
            Phase::Running { .. } => ClockState::Running,
            Phase::Paused { .. } => ClockState::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state() == ClockState::Paused
    }

    /// The active transition, if one is running or paused.
    pub fn spec(&self) -> Option<&AnimationSpec> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Running { active, .. } | Phase::Paused { active, .. } => Some(&active.spec),
        }
    }

    /// Arm a transition from `from` to `to`.
    ///
    /// If a transition is already in flight its currently interpolated
    /// value replaces `from`, so redirecting never produces a visual jump.
    /// The superseded completion is dropped, never fired.
    pub fn start(
        &mut self,
        now: Instant,
        from: f32,
        to: f32,
        transition: Transition,
        completion: Option<Completion>,
    ) -> StartOutcome {
        let from = self.value_at(now).unwrap_or(from);
        // Replacing the phase drops any superseded completion here
        self.phase = Phase::Idle;

        if transition.duration.is_zero() {
            return StartOutcome::Jumped {
                value: to,
                completion,
            };
        }

        let spec = AnimationSpec {
            from,
            to,
            transition,
        };
        log::debug!("clock start: {} -> {} over {:?}", from, to, spec.transition.duration);
        self.phase = Phase::Running {
            active: Active { spec, completion },
            segment_start: now,
            banked: Duration::ZERO,
        };
        StartOutcome::Started { from }
    }

    /// Running time accumulated by the active spec, if any.
    fn elapsed(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Running {
                segment_start,
                banked,
                ..
            } => Some(*banked + now.saturating_duration_since(*segment_start)),
            Phase::Paused { banked, .. } => Some(*banked),
        }
    }

    /// Interpolated value of the active spec at `now`, if any.
    pub fn value_at(&self, now: Instant) -> Option<f32> {
        let elapsed = self.elapsed(now)?;
        let active = match &self.phase {
            Phase::Idle => return None,
            Phase::Running { active, .. } | Phase::Paused { active, .. } => active,
        };
        Some(active.spec.value_at_elapsed(elapsed))
    }

    /// Running time still needed before the active spec completes.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = self.elapsed(now)?;
        let duration = match &self.phase {
            Phase::Idle => return None,
            Phase::Running { active, .. } | Phase::Paused { active, .. } => {
                active.spec.transition.duration
            }
        };
        Some(duration.saturating_sub(elapsed))
    }

    /// Advance by one frame. Finishing hands the completion back to the
    /// caller so it can order value application before the callback.
    pub fn advance(&mut self, now: Instant) -> Advance {
        let Phase::Running {
            active,
            segment_start,
            banked,
        } = &mut self.phase
        else {
            return Advance::NoChange;
        };

        let elapsed = *banked + now.saturating_duration_since(*segment_start);
        if elapsed >= active.spec.transition.duration {
            let value = active.spec.to;
            let completion = active.completion.take();
            self.phase = Phase::Idle;
            log::debug!("clock finished at {}", value);
            return Advance::Finished { value, completion };
        }
        Advance::Changed(active.spec.value_at_elapsed(elapsed))
    }

    /// Freeze elapsed running time.
    pub fn pause(&mut self, now: Instant) -> Result<(), ClockError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Running {
                active,
                segment_start,
                banked,
            } => {
                let banked = banked + now.saturating_duration_since(segment_start);
                self.phase = Phase::Paused { active, banked };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(ClockError::NotRunning)
            }
        }
    }

    /// Unfreeze: the next running segment starts at `now`, so wall-clock
    /// time spent paused is never counted.
    pub fn resume(&mut self, now: Instant) -> Result<(), ClockError> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Paused { active, banked } => {
                self.phase = Phase::Running {
                    active,
                    segment_start: now,
                    banked,
                };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(ClockError::NotPaused)
            }
        }
    }

    /// Hard stop: the spec is discarded and its completion never fires.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Capture a running spec for host suspension, leaving the clock idle.
    /// Returns `None` (and changes nothing) unless the clock is running.
    pub fn take_snapshot(&mut self, now: Instant) -> Option<ClockSnapshot> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Running {
                active,
                segment_start,
                banked,
            } => Some(ClockSnapshot {
                elapsed: banked + now.saturating_duration_since(segment_start),
                active,
            }),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Reinstall a snapshot as a running spec whose segment starts at
    /// `now`. Time spent suspended is not counted against the animation.
    /// Any spec armed in the meantime is superseded.
    pub fn restore(&mut self, snapshot: ClockSnapshot, now: Instant) {
        self.phase = Phase::Running {
            active: snapshot.active,
            segment_start: now,
            banked: snapshot.elapsed,
        };
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
