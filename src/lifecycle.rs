//! Host suspend/resume orchestration.
//!
//! When the host app is backgrounded its refresh loop stops, but wall
//! clocks keep running; without intervention a resumed animation would
//! count the whole suspension against its duration and jump to the end.
//! The coordinator snapshots a running animation at suspend time and
//! reinstalls it on resume with a fresh segment start, so suspended
//! wall-clock time is never counted. A ticking timer is paused and
//! resumed the same way.

use std::time::Instant;

use crate::animation::{AnimationClock, ClockSnapshot};
use crate::timer::TimerSequencer;

/// Owns at most one in-flight snapshot between suspend and resume.
///
/// A second suspend before a resume overwrites the snapshot
/// (last-write-wins); a resume without one is a no-op.
pub struct LifecycleCoordinator {
    snapshot: Option<ClockSnapshot>,
    timer_was_ticking: bool,
}

impl LifecycleCoordinator {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            timer_was_ticking: false,
        }
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Capture in-flight state ahead of host suspension.
    ///
    /// Only a `Running` clock is captured; idle and paused clocks need no
    /// help surviving suspension.
    pub fn suspend(
        &mut self,
        now: Instant,
        clock: &mut AnimationClock,
        timer: &mut TimerSequencer,
    ) {
        if let Some(snapshot) = clock.take_snapshot(now) {
            if self.snapshot.is_some() {
                log::debug!("suspend: replacing an unconsumed animation snapshot");
            }
            self.snapshot = Some(snapshot);
        }
        if timer.is_ticking() && timer.pause(now).is_ok() {
            self.timer_was_ticking = true;
        }
        log::debug!(
            "host suspending (animation snapshot: {}, timer paused: {})",
            self.snapshot.is_some(),
            self.timer_was_ticking
        );
    }

    /// Reinstall captured state after the host resumes. The snapshot is
    /// consumed; calling this again without a new suspend does nothing.
    pub fn resume(
        &mut self,
        now: Instant,
        clock: &mut AnimationClock,
        timer: &mut TimerSequencer,
    ) {
        if let Some(snapshot) = self.snapshot.take() {
            clock.restore(snapshot, now);
            log::debug!("host resumed: animation reinstalled");
        }
        if self.timer_was_ticking {
            if let Err(err) = timer.resume(now) {
                log::debug!("host resumed: timer not resumed ({})", err);
            }
            self.timer_was_ticking = false;
        }
    }
}

impl Default for LifecycleCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
