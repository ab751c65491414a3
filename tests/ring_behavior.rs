//! End-to-end behavior of the ring widget on synthetic clocks.
//!
//! Every scenario drives the widget through its `*_at` API so elapsed
//! time is exact and no test ever sleeps.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use annular::prelude::*;

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

fn linear_ring(min: f32, max: f32) -> ProgressRing {
    ring()
        .range(min, max)
        .config(RingConfig::new().timing(TimingFunction::Linear))
}

#[test]
fn assignment_below_minimum_clamps_up() {
    let mut widget = ring().range(10.0, 100.0);
    widget.set_value(-5.0);
    assert_eq!(widget.current_value(), 10.0);
}

#[test]
fn assignment_above_maximum_clamps_down() {
    let mut widget = ring().range(0.0, 100.0);
    widget.set_value(250.0);
    assert_eq!(widget.current_value(), 100.0);
}

#[test]
fn zero_duration_start_completes_before_returning() {
    let t0 = Instant::now();
    let order = Rc::new(RefCell::new(Vec::new()));

    let sink = order.clone();
    let mut widget = linear_ring(0.0, 100.0);
    widget.subscribe(move |event| sink.borrow_mut().push(format!("{:?}", event)));

    let sink = order.clone();
    widget.start_progress_at(
        t0,
        60.0,
        Duration::ZERO,
        Some(Box::new(move || sink.borrow_mut().push("completion".into()))),
    );

    // Value applied, Finished emitted, completion fired - all
    // synchronously, with no Running state in between
    assert!(!widget.is_animating());
    assert_eq!(
        *order.borrow(),
        vec!["ValueChanged(60.0)", "Finished", "completion"]
    );
}

#[test]
fn redirect_mid_flight_starts_from_interpolated_value() {
    let t0 = Instant::now();
    let mut widget = linear_ring(0.0, 100.0);

    widget.start_progress_at(t0, 100.0, Duration::from_secs(4), None);
    widget.tick_at(at(t0, 1000));
    assert_eq!(widget.current_value(), 25.0);

    // Redirect: from must be 25 (the interpolated value), not 0 or 100
    widget.start_progress_at(at(t0, 1000), 75.0, Duration::from_secs(1), None);
    widget.tick_at(at(t0, 1500));
    assert_eq!(widget.current_value(), 50.0);
    widget.tick_at(at(t0, 2000));
    assert_eq!(widget.current_value(), 75.0);
}

#[test]
fn superseded_completion_never_fires() {
    let t0 = Instant::now();
    let first = Rc::new(Cell::new(false));
    let second = Rc::new(Cell::new(false));

    let mut widget = linear_ring(0.0, 100.0);
    let flag = first.clone();
    widget.start_progress_at(
        t0,
        100.0,
        Duration::from_secs(1),
        Some(Box::new(move || flag.set(true))),
    );
    let flag = second.clone();
    widget.start_progress_at(
        at(t0, 500),
        50.0,
        Duration::from_secs(1),
        Some(Box::new(move || flag.set(true))),
    );

    widget.tick_at(at(t0, 10_000));
    assert!(!first.get());
    assert!(second.get());
}

#[test]
fn pause_resume_conserves_running_time() {
    // D = 2.0s, paused at e1 = 0.5s, resumed after an arbitrary pause:
    // completion fires 1.5s of running time after the resume
    let t0 = Instant::now();
    let completed = Rc::new(Cell::new(false));

    let mut widget = linear_ring(0.0, 100.0);
    let flag = completed.clone();
    widget.start_progress_at(
        t0,
        100.0,
        Duration::from_secs(2),
        Some(Box::new(move || flag.set(true))),
    );

    widget.tick_at(at(t0, 500));
    widget.pause_progress_at(at(t0, 500));

    // An hour of wall-clock pause changes nothing
    widget.tick_at(at(t0, 3_600_500));
    assert_eq!(widget.current_value(), 25.0);

    widget.continue_progress_at(at(t0, 3_600_500));
    widget.tick_at(at(t0, 3_601_999));
    assert!(!completed.get());
    widget.tick_at(at(t0, 3_602_000));
    assert!(completed.get());
    assert_eq!(widget.current_value(), 100.0);
}

#[test]
fn timer_ticks_are_exact_and_terminal() {
    // total = 1.0s, interval = 0.1s: exactly ten ticks, the last at
    // exactly the total and marked final
    let t0 = Instant::now();
    let ticks = Rc::new(RefCell::new(Vec::new()));
    let done = Rc::new(Cell::new(false));

    let mut widget = ring();
    let sink = ticks.clone();
    let flag = done.clone();
    widget.start_timer_at(
        t0,
        Duration::from_secs(1),
        Duration::from_millis(100),
        move |tick| sink.borrow_mut().push(tick),
        move || flag.set(true),
    );

    for frame in 1..=25 {
        widget.tick_at(at(t0, frame * 40));
    }

    let ticks = ticks.borrow();
    assert_eq!(ticks.len(), 10);
    for (i, tick) in ticks.iter().enumerate() {
        assert_eq!(tick.elapsed, Duration::from_millis(100 * (i as u64 + 1)));
        assert!(tick.elapsed <= Duration::from_secs(1));
    }
    assert!(ticks[9].is_final);
    assert!(done.get());

    // Done is terminal: nothing more comes out
    widget.tick_at(at(t0, 60_000));
    assert_eq!(ticks.len(), 10);
}

#[test]
fn timer_pause_resumes_mid_interval() {
    let t0 = Instant::now();
    let ticks = Rc::new(RefCell::new(Vec::new()));

    let mut widget = ring();
    let sink = ticks.clone();
    widget.start_timer_at(
        t0,
        Duration::from_secs(1),
        Duration::from_millis(100),
        move |tick| sink.borrow_mut().push(tick.elapsed),
        || {},
    );

    widget.tick_at(at(t0, 250));
    widget.pause_timer_at(at(t0, 250));
    widget.tick_at(at(t0, 30_000));
    assert_eq!(ticks.borrow().len(), 2);

    // 50ms of the third interval remain after resume
    widget.continue_timer_at(at(t0, 30_000));
    widget.tick_at(at(t0, 30_049));
    assert_eq!(ticks.borrow().len(), 2);
    widget.tick_at(at(t0, 30_050));
    assert_eq!(ticks.borrow().last(), Some(&Duration::from_millis(300)));
}

#[test]
fn suspension_does_not_consume_running_time() {
    // D = 1.0s, suspended at 0.4s for five minutes: completion arrives
    // 0.6s of running time after the resume
    let t0 = Instant::now();
    let completed = Rc::new(Cell::new(false));

    let mut widget = linear_ring(0.0, 100.0);
    let flag = completed.clone();
    widget.start_progress_at(
        t0,
        100.0,
        Duration::from_secs(1),
        Some(Box::new(move || flag.set(true))),
    );
    widget.tick_at(at(t0, 400));

    widget.on_host_will_suspend_at(at(t0, 400));
    widget.on_host_did_resume_at(at(t0, 300_400));

    widget.tick_at(at(t0, 300_400));
    assert_eq!(widget.current_value(), 40.0);

    widget.tick_at(at(t0, 300_999));
    assert!(!completed.get());
    widget.tick_at(at(t0, 301_000));
    assert!(completed.get());
}

#[test]
fn suspension_while_idle_changes_nothing() {
    let t0 = Instant::now();
    let mut widget = linear_ring(0.0, 100.0);
    widget.set_value(30.0);

    widget.on_host_will_suspend_at(t0);
    widget.on_host_did_resume_at(at(t0, 5000));

    assert_eq!(widget.current_value(), 30.0);
    assert!(!widget.is_animating());
}

#[test]
fn full_circle_geometry_matches_value() {
    use annular::geometry::{inner_arc, RingMetrics};

    let metrics = RingMetrics {
        size: 100.0,
        outer_width: 10.0,
        inner_width: 8.0,
        spacing: 1.0,
        knob_diameter: 0.0,
    };
    let arc = inner_arc(
        50.0,
        0.0,
        100.0,
        0.0,
        360.0,
        true,
        true,
        &metrics,
        &RingStyle::OnTop,
    );
    assert_eq!(arc.sweep(), 180.0);
}

#[test]
fn wrapped_partial_arc_sweeps_half_the_span() {
    use annular::geometry::{inner_arc, RingMetrics};

    let metrics = RingMetrics {
        size: 100.0,
        outer_width: 10.0,
        inner_width: 8.0,
        spacing: 1.0,
        knob_diameter: 0.0,
    };
    // start 300, end 60: span 120, midpoint value sweeps 60 from start
    let arc = inner_arc(
        50.0,
        0.0,
        100.0,
        300.0,
        60.0,
        false,
        true,
        &metrics,
        &RingStyle::OnTop,
    );
    assert_eq!(arc.sweep(), 60.0);
}

#[test]
fn scenario_pause_mid_animation_then_finish() {
    // Create a ring 0..100 at 0; animate to 100 over 5s; pause at 2.5s
    // (value 50); wait 10s; continue; completion fires 2.5s later
    let t0 = Instant::now();
    let events = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(Cell::new(false));

    let mut widget = linear_ring(0.0, 100.0);
    let sink = events.clone();
    widget.subscribe(move |event| {
        if !matches!(event, RingEvent::ValueChanged(_)) {
            sink.borrow_mut().push(format!("{:?}", event));
        }
    });

    let flag = completed.clone();
    widget.start_progress_at(
        t0,
        100.0,
        Duration::from_secs(5),
        Some(Box::new(move || flag.set(true))),
    );

    widget.tick_at(at(t0, 2500));
    assert!((widget.current_value() - 50.0).abs() < 0.001);

    widget.pause_progress_at(at(t0, 2500));
    widget.tick_at(at(t0, 12_500));
    widget.continue_progress_at(at(t0, 12_500));

    widget.tick_at(at(t0, 14_999));
    assert!(!completed.get());
    widget.tick_at(at(t0, 15_000));
    assert!(completed.get());
    assert_eq!(widget.current_value(), 100.0);

    assert_eq!(*events.borrow(), vec!["Paused", "Continued", "Finished"]);
}

#[test]
fn paint_is_stable_while_paused() {
    let t0 = Instant::now();
    let mut widget = linear_ring(0.0, 100.0).bounds(Rect::new(0.0, 0.0, 120.0, 120.0));

    widget.start_progress_at(t0, 100.0, Duration::from_secs(1), None);
    widget.tick_at(at(t0, 500));
    widget.pause_progress_at(at(t0, 500));

    let mut first = PaintContext::new();
    widget.paint(&mut first);
    widget.tick_at(at(t0, 90_000));
    let mut second = PaintContext::new();
    widget.paint(&mut second);

    let sweep = |ctx: &PaintContext| match &ctx.commands()[1] {
        DrawCommand::ArcStroke { arc, .. } => arc.sweep_angle,
        other => panic!("expected inner arc, got {:?}", other),
    };
    assert_eq!(sweep(&first), sweep(&second));
}
