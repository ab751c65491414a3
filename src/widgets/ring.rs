//! The ring widget.
//!
//! [`ProgressRing`] composes the value/time machinery (one
//! [`AnimationClock`], one [`TimerSequencer`], one
//! [`LifecycleCoordinator`]) behind the public API the host view layer
//! consumes. The host drives it by calling [`ProgressRing::tick`] from
//! its refresh loop and replaying [`ProgressRing::paint`] output.
//!
//! Every time-sensitive operation has an `*_at(now)` twin taking an
//! explicit [`Instant`]; the plain methods supply `Instant::now()`.
//!
//! # Example
//! ```ignore
//! let mut ring = ring()
//!     .range(0.0, 100.0)
//!     .config(RingConfig::new().label(LabelStyle::new(LabelFormat::Percent { decimals: 0 })));
//! ring.start_progress(100.0, Duration::from_secs(5));
//! loop {
//!     let active = ring.tick();
//!     let mut ctx = PaintContext::new();
//!     ring.paint(&mut ctx);
//!     // hand ctx.take_commands() to the renderer
//!     if !active { break; }
//! }
//! ```

use std::time::{Duration, Instant};

use kurbo::Point;

use crate::animation::{Advance, AnimationClock, Completion, StartOutcome, Transition};
use crate::events::{Observers, RingEvent, SubscriptionId};
use crate::geometry::{self, sweep_fraction, RingMetrics};
use crate::label::format_label;
use crate::lifecycle::LifecycleCoordinator;
use crate::render::{arc_path, point_at, ArcBorder, DrawCommand, PaintContext, StrokeCap};
use crate::style::{RingConfig, RingStyle};
use crate::timer::{TimerSequencer, TimerTick};
use crate::widgets::{ChangeFlags, Rect};

/// A bounded scalar: the ring's displayed value and its range.
///
/// Writes clamp to both ends of the range; a value past the maximum
/// never loops the inner ring around for an extra revolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingValue {
    value: f32,
    min: f32,
    max: f32,
}

impl RingValue {
    pub fn new(value: f32, min: f32, max: f32) -> Self {
        let mut this = Self {
            value: min,
            min,
            max: min,
        };
        this.set_range(min, max);
        this.set(value);
        this
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fraction of the range the value covers, 0 for a zero-width range.
    pub fn fraction(&self) -> f32 {
        sweep_fraction(self.value, self.min, self.max)
    }

    /// Store a value, clamped into the range. Returns whether the stored
    /// value changed. NaN is rejected, not stored.
    pub fn set(&mut self, value: f32) -> bool {
        if value.is_nan() {
            log::debug!("NaN value ignored (range {}..{})", self.min, self.max);
            return false;
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            log::debug!(
                "value {} clamped to {} (range {}..{})",
                value,
                clamped,
                self.min,
                self.max
            );
        }
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    /// Replace the range, re-clamping the stored value. An inverted range
    /// collapses to `min..min`.
    pub fn set_range(&mut self, min: f32, max: f32) {
        let max = if max < min {
            log::debug!("range max {} raised to min {}", max, min);
            min
        } else {
            max
        };
        self.min = min;
        self.max = max;
        self.value = self.value.clamp(min, max);
    }
}

/// Circular progress/timer indicator.
pub struct ProgressRing {
    config: RingConfig,
    value: RingValue,
    clock: AnimationClock,
    timer: TimerSequencer,
    lifecycle: LifecycleCoordinator,
    observers: Observers,
    on_timer_tick: Option<Box<dyn FnMut(TimerTick)>>,
    on_timer_done: Option<Box<dyn FnOnce()>>,
    bounds: Rect,
    dirty: ChangeFlags,
}

impl ProgressRing {
    pub fn new() -> Self {
        Self {
            config: RingConfig::default(),
            value: RingValue::new(0.0, 0.0, 100.0),
            clock: AnimationClock::new(),
            timer: TimerSequencer::new(),
            lifecycle: LifecycleCoordinator::new(),
            observers: Observers::new(),
            on_timer_tick: None,
            on_timer_done: None,
            bounds: Rect::default(),
            dirty: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
        }
    }

    // --- builders -------------------------------------------------------

    pub fn config(mut self, config: RingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.value.set_range(min, max);
        self
    }

    pub fn value(mut self, value: f32) -> Self {
        self.value.set(value);
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    // --- accessors ------------------------------------------------------

    pub fn current_value(&self) -> f32 {
        self.value.get()
    }

    pub fn ring_value(&self) -> &RingValue {
        &self.value
    }

    pub fn style_config(&self) -> &RingConfig {
        &self.config
    }

    /// Mutable config access; assumes the caller changed something
    /// visible.
    pub fn style_config_mut(&mut self) -> &mut RingConfig {
        self.dirty |= ChangeFlags::NEEDS_PAINT;
        &mut self.config
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.dirty |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        }
    }

    pub fn widget_bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    pub fn needs_paint(&self) -> bool {
        self.dirty.contains(ChangeFlags::NEEDS_PAINT)
    }

    pub fn needs_layout(&self) -> bool {
        self.dirty.contains(ChangeFlags::NEEDS_LAYOUT)
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = ChangeFlags::empty();
    }

    // --- observers ------------------------------------------------------

    /// Subscribe to ring events. Value updates arrive once per frame
    /// while animating, so callbacks must stay cheap.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&RingEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- direct value mutation -----------------------------------------

    /// Set the value without animating. While an animation is in flight
    /// the driver overwrites this on the next frame.
    pub fn set_value(&mut self, value: f32) {
        if self.clock.is_running() {
            log::debug!("set_value during an animation; the driver will overwrite it");
        }
        self.apply_value(value);
    }

    /// Replace the value range, re-clamping the current value.
    pub fn set_range(&mut self, min: f32, max: f32) {
        self.value.set_range(min, max);
        self.dirty |= ChangeFlags::NEEDS_PAINT;
    }

    // --- progress animation --------------------------------------------

    /// Animate the value to `to` over `duration`.
    pub fn start_progress(&mut self, to: f32, duration: Duration) {
        self.start_progress_at(Instant::now(), to, duration, None);
    }

    /// Animate the value to `to` over `duration`, invoking `completion`
    /// when the target is reached. Redirecting an in-flight animation
    /// drops its completion without firing it.
    pub fn start_progress_with<F>(&mut self, to: f32, duration: Duration, completion: F)
    where
        F: FnOnce() + 'static,
    {
        self.start_progress_at(Instant::now(), to, duration, Some(Box::new(completion)));
    }

    pub fn start_progress_at(
        &mut self,
        now: Instant,
        to: f32,
        duration: Duration,
        completion: Option<Completion>,
    ) {
        let target = to.clamp(self.value.min(), self.value.max());
        if target != to {
            log::debug!("progress target {} clamped to {}", to, target);
        }
        let transition = Transition::new(duration, self.config.timing.clone());
        match self
            .clock
            .start(now, self.value.get(), target, transition, completion)
        {
            StartOutcome::Jumped { value, completion } => {
                // Instantaneous: no Running state is ever observable
                self.apply_value(value);
                self.observers.emit(&RingEvent::Finished);
                if let Some(done) = completion {
                    done();
                }
            }
            StartOutcome::Started { .. } => {
                self.dirty |= ChangeFlags::NEEDS_PAINT;
            }
        }
    }

    /// Freeze the running animation. Pausing anything else is a logged
    /// no-op.
    pub fn pause_progress(&mut self) {
        self.pause_progress_at(Instant::now());
    }

    pub fn pause_progress_at(&mut self, now: Instant) {
        match self.clock.pause(now) {
            Ok(()) => self.observers.emit(&RingEvent::Paused),
            Err(err) => log::warn!("pause_progress: {}", err),
        }
    }

    /// Resume the paused animation. Resuming anything else is a logged
    /// no-op.
    pub fn continue_progress(&mut self) {
        self.continue_progress_at(Instant::now());
    }

    pub fn continue_progress_at(&mut self, now: Instant) {
        match self.clock.resume(now) {
            Ok(()) => self.observers.emit(&RingEvent::Continued),
            Err(err) => log::warn!("continue_progress: {}", err),
        }
    }

    /// Hard stop: the value jumps to the range minimum and any pending
    /// completion is discarded, not fired.
    pub fn reset_progress(&mut self) {
        self.clock.reset();
        self.apply_value(self.value.min());
        self.dirty |= ChangeFlags::NEEDS_PAINT;
    }

    // --- timer ----------------------------------------------------------

    /// Run a timer for `total`, ticking every `interval`. The value range
    /// is retargeted to `[0, total]` seconds and the value tracks elapsed
    /// tick time, so the ring fills as the timer runs.
    pub fn start_timer<T, D>(&mut self, total: Duration, interval: Duration, on_tick: T, on_done: D)
    where
        T: FnMut(TimerTick) + 'static,
        D: FnOnce() + 'static,
    {
        self.start_timer_at(Instant::now(), total, interval, on_tick, on_done);
    }

    pub fn start_timer_at<T, D>(
        &mut self,
        now: Instant,
        total: Duration,
        interval: Duration,
        on_tick: T,
        on_done: D,
    ) where
        T: FnMut(TimerTick) + 'static,
        D: FnOnce() + 'static,
    {
        self.value.set_range(0.0, total.as_secs_f32());
        self.apply_value(0.0);
        self.on_timer_tick = Some(Box::new(on_tick));
        self.on_timer_done = Some(Box::new(on_done));
        self.timer.start(now, total, interval);
        self.dirty |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn pause_timer(&mut self) {
        self.pause_timer_at(Instant::now());
    }

    pub fn pause_timer_at(&mut self, now: Instant) {
        match self.timer.pause(now) {
            Ok(()) => self.observers.emit(&RingEvent::Paused),
            Err(err) => log::warn!("pause_timer: {}", err),
        }
    }

    pub fn continue_timer(&mut self) {
        self.continue_timer_at(Instant::now());
    }

    pub fn continue_timer_at(&mut self, now: Instant) {
        match self.timer.resume(now) {
            Ok(()) => self.observers.emit(&RingEvent::Continued),
            Err(err) => log::warn!("continue_timer: {}", err),
        }
    }

    // --- host lifecycle -------------------------------------------------

    /// Call when the host app is about to be suspended.
    pub fn on_host_will_suspend(&mut self) {
        self.on_host_will_suspend_at(Instant::now());
    }

    pub fn on_host_will_suspend_at(&mut self, now: Instant) {
        self.lifecycle
            .suspend(now, &mut self.clock, &mut self.timer);
    }

    /// Call when the host app returned to the foreground.
    pub fn on_host_did_resume(&mut self) {
        self.on_host_did_resume_at(Instant::now());
    }

    pub fn on_host_did_resume_at(&mut self, now: Instant) {
        self.lifecycle.resume(now, &mut self.clock, &mut self.timer);
    }

    // --- frame driver ---------------------------------------------------

    /// Advance animation and timer state by one frame. Returns whether
    /// anything is still in flight (the host can skip scheduling frames
    /// when it returns false).
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.clock.advance(now) {
            Advance::NoChange => {}
            Advance::Changed(value) => {
                self.apply_value(value);
            }
            Advance::Finished { value, completion } => {
                self.apply_value(value);
                self.observers.emit(&RingEvent::Finished);
                if let Some(done) = completion {
                    done();
                }
            }
        }

        for tick in self.timer.advance(now) {
            self.apply_value(tick.elapsed.as_secs_f32());
            self.observers.emit(&RingEvent::TimerTick {
                elapsed: tick.elapsed,
                remaining: tick.remaining,
            });
            if let Some(callback) = self.on_timer_tick.as_mut() {
                callback(tick);
            }
            if tick.is_final {
                self.observers.emit(&RingEvent::TimerDone);
                self.on_timer_tick = None;
                if let Some(done) = self.on_timer_done.take() {
                    done();
                }
            }
        }

        self.clock.is_running() || self.timer.is_ticking()
    }

    fn apply_value(&mut self, value: f32) -> bool {
        let changed = self.value.set(value);
        if changed {
            self.dirty |= ChangeFlags::NEEDS_PAINT;
            self.observers
                .emit(&RingEvent::ValueChanged(self.value.get()));
        }
        changed
    }

    // --- painting -------------------------------------------------------

    fn metrics(&self) -> RingMetrics {
        RingMetrics {
            size: self.bounds.min_side(),
            outer_width: self.config.outer_width,
            inner_width: self.config.inner_width,
            spacing: self.config.spacing,
            knob_diameter: self.config.knob.as_ref().map_or(0.0, |k| k.diameter),
        }
    }

    /// Record this ring's draw commands: outer track, inner progress arc,
    /// knob, then label.
    pub fn paint(&self, ctx: &mut PaintContext) {
        let config = &self.config;
        let metrics = self.metrics();
        let center = self.bounds.center();

        let outer = geometry::outer_arc(
            config.start_angle,
            config.end_angle,
            config.full_circle,
            config.clockwise,
            &metrics,
            &config.style,
        );
        let border = match &config.style {
            RingStyle::Bordered { width, color } => Some(ArcBorder {
                width: *width,
                color: *color,
            }),
            _ => None,
        };
        ctx.push(DrawCommand::ArcStroke {
            arc: arc_path(&outer, center),
            width: config.outer_width,
            color: config.outer_color,
            cap: StrokeCap::Butt,
            dash: None,
            gradient: None,
            border,
        });

        let inner = geometry::inner_arc(
            self.value.get(),
            self.value.min(),
            self.value.max(),
            config.start_angle,
            config.end_angle,
            config.full_circle,
            config.clockwise,
            &metrics,
            &config.style,
        );
        if inner.sweep() != 0.0 {
            let (cap, dash) = match &config.style {
                RingStyle::Dashed { pattern } => (StrokeCap::Butt, Some(pattern.clone())),
                // Zero-length dashes with round caps read as dots
                RingStyle::Dotted => (StrokeCap::Round, Some(vec![0.0, config.inner_width * 2.0])),
                _ => (StrokeCap::Round, None),
            };
            let gradient = match &config.style {
                RingStyle::Gradient(options) => Some(options.clone()),
                _ => None,
            };
            ctx.push(DrawCommand::ArcStroke {
                arc: arc_path(&inner, center),
                width: config.inner_width,
                color: config.inner_color,
                cap,
                dash,
                gradient,
                border: None,
            });
        }

        if let Some(knob) = &config.knob {
            let head = point_at(center, inner.radius, inner.end_angle);
            ctx.draw_knob(head, knob.diameter / 2.0, knob.color);
        }

        if let Some(label) = &config.label {
            let text = format_label(
                &label.format,
                self.value.get(),
                self.value.min(),
                self.value.max(),
            );
            ctx.draw_label(
                text,
                Point::new(center.0 as f64, center.1 as f64),
                label.color,
                label.font_size,
            );
        }
    }
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a ring widget
///
/// ```ignore
/// let mut widget = ring().range(0.0, 100.0).value(30.0);
/// ```
pub fn ring() -> ProgressRing {
    ProgressRing::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelFormat;
    use crate::style::{KnobStyle, LabelStyle};
    use crate::widgets::Color;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_value_clamps_low() {
        let mut value = RingValue::new(50.0, 0.0, 100.0);
        value.set(-10.0);
        assert_eq!(value.get(), 0.0);
    }

    #[test]
    fn test_value_clamps_high() {
        let mut value = RingValue::new(50.0, 0.0, 100.0);
        value.set(150.0);
        assert_eq!(value.get(), 100.0);
    }

    #[test]
    fn test_nan_value_is_rejected() {
        let mut value = RingValue::new(50.0, 0.0, 100.0);
        assert!(!value.set(f32::NAN));
        assert_eq!(value.get(), 50.0);
    }

    #[test]
    fn test_inverted_range_collapses() {
        let value = RingValue::new(5.0, 10.0, 0.0);
        assert_eq!(value.min(), 10.0);
        assert_eq!(value.max(), 10.0);
        assert_eq!(value.get(), 10.0);
        assert_eq!(value.fraction(), 0.0);
    }

    #[test]
    fn test_shrinking_range_reclamps_value() {
        let mut widget = ring().range(0.0, 100.0).value(80.0);
        widget.set_range(0.0, 50.0);
        assert_eq!(widget.current_value(), 50.0);
    }

    #[test]
    fn test_zero_duration_completes_synchronously() {
        let t0 = Instant::now();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();

        let mut widget = ring().range(0.0, 100.0);
        widget.start_progress_at(
            t0,
            75.0,
            Duration::ZERO,
            Some(Box::new(move || flag.set(true))),
        );

        assert!(fired.get());
        assert_eq!(widget.current_value(), 75.0);
        assert!(!widget.is_animating());
    }

    #[test]
    fn test_progress_target_clamps_into_range() {
        let t0 = Instant::now();
        let mut widget = ring().range(0.0, 100.0);
        widget.start_progress_at(t0, 500.0, Duration::ZERO, None);
        assert_eq!(widget.current_value(), 100.0);
    }

    #[test]
    fn test_events_for_full_animation() {
        let t0 = Instant::now();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut widget = ring().range(0.0, 100.0);
        widget.style_config_mut().timing = crate::animation::TimingFunction::Linear;
        widget.subscribe(move |event| sink.borrow_mut().push(*event));

        widget.start_progress_at(t0, 100.0, Duration::from_millis(1000), None);
        widget.tick_at(at(t0, 500));
        widget.tick_at(at(t0, 1000));

        let events = seen.borrow();
        assert_eq!(events[0], RingEvent::ValueChanged(50.0));
        assert_eq!(events[1], RingEvent::ValueChanged(100.0));
        assert_eq!(events[2], RingEvent::Finished);
    }

    #[test]
    fn test_redirect_continues_from_interpolated_value() {
        let t0 = Instant::now();
        let mut widget = ring().range(0.0, 100.0);
        widget.style_config_mut().timing = crate::animation::TimingFunction::Linear;

        widget.start_progress_at(t0, 100.0, Duration::from_millis(1000), None);
        widget.tick_at(at(t0, 500));
        assert_eq!(widget.current_value(), 50.0);

        // Redirect toward 0: the new transition starts at 50, so the
        // next frame must not jump above it
        widget.start_progress_at(at(t0, 500), 0.0, Duration::from_millis(1000), None);
        widget.tick_at(at(t0, 750));
        assert_eq!(widget.current_value(), 37.5);
    }

    #[test]
    fn test_pause_misuse_is_harmless() {
        let mut widget = ring();
        widget.pause_progress_at(Instant::now());
        widget.continue_progress_at(Instant::now());
        widget.pause_timer_at(Instant::now());
        widget.continue_timer_at(Instant::now());
        assert_eq!(widget.current_value(), 0.0);
    }

    #[test]
    fn test_reset_jumps_to_minimum_without_completion() {
        let t0 = Instant::now();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();

        let mut widget = ring().range(10.0, 100.0).value(10.0);
        widget.start_progress_at(
            t0,
            100.0,
            Duration::from_millis(1000),
            Some(Box::new(move || flag.set(true))),
        );
        widget.tick_at(at(t0, 500));
        widget.reset_progress();

        assert_eq!(widget.current_value(), 10.0);
        assert!(!widget.is_animating());
        widget.tick_at(at(t0, 2000));
        assert!(!fired.get());
    }

    #[test]
    fn test_timer_drives_value_and_callbacks() {
        let t0 = Instant::now();
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let done = Rc::new(Cell::new(false));
        let tick_sink = ticks.clone();
        let done_flag = done.clone();

        let mut widget = ring();
        widget.start_timer_at(
            t0,
            Duration::from_secs(1),
            Duration::from_millis(250),
            move |tick| tick_sink.borrow_mut().push(tick.elapsed),
            move || done_flag.set(true),
        );

        // The range retargets to the timer's total in seconds
        assert_eq!(widget.ring_value().max(), 1.0);

        widget.tick_at(at(t0, 500));
        assert_eq!(widget.current_value(), 0.5);
        assert!(!done.get());

        widget.tick_at(at(t0, 1000));
        assert_eq!(widget.current_value(), 1.0);
        assert!(done.get());
        assert_eq!(
            *ticks.borrow(),
            vec![
                Duration::from_millis(250),
                Duration::from_millis(500),
                Duration::from_millis(750),
                Duration::from_millis(1000),
            ]
        );
    }

    #[test]
    fn test_tick_reports_activity() {
        let t0 = Instant::now();
        let mut widget = ring().range(0.0, 100.0);
        assert!(!widget.tick_at(t0));

        widget.start_progress_at(t0, 100.0, Duration::from_millis(100), None);
        assert!(widget.tick_at(at(t0, 50)));
        assert!(!widget.tick_at(at(t0, 100)));
    }

    #[test]
    fn test_paint_emits_track_arc_knob_and_label() {
        let mut widget = ring()
            .range(0.0, 100.0)
            .value(50.0)
            .bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        *widget.style_config_mut() = RingConfig::new()
            .knob(KnobStyle::new(12.0, Color::WHITE))
            .label(LabelStyle::new(LabelFormat::Percent { decimals: 0 }));

        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx);

        let commands = ctx.commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::ArcStroke { .. }));
        assert!(matches!(commands[1], DrawCommand::ArcStroke { .. }));
        assert!(matches!(commands[2], DrawCommand::Knob { .. }));
        match &commands[3] {
            DrawCommand::Label { text, .. } => assert_eq!(text, "50%"),
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn test_paint_skips_empty_inner_arc() {
        let widget = ring()
            .range(0.0, 100.0)
            .bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx);
        // Only the outer track at value 0
        assert_eq!(ctx.commands().len(), 1);
    }

    #[test]
    fn test_dirty_flags_track_value_changes() {
        let mut widget = ring().range(0.0, 100.0);
        widget.clear_dirty();
        assert!(!widget.needs_paint());

        widget.set_value(30.0);
        assert!(widget.needs_paint());

        widget.clear_dirty();
        widget.set_value(30.0);
        assert!(!widget.needs_paint());
    }

    #[test]
    fn test_set_bounds_marks_layout() {
        let mut widget = ring();
        widget.clear_dirty();
        widget.set_bounds(Rect::new(0.0, 0.0, 64.0, 64.0));
        assert!(widget.needs_layout());
        assert!(widget.needs_paint());
    }
}
