//! Terminal simulation of an animated progress ring.
//!
//! Drives the widget the way a host view layer would: tick every frame,
//! repaint when dirty, pause briefly mid-flight to show that paused
//! wall-clock time never counts against the animation.

use std::time::{Duration, Instant};

use annular::prelude::*;

fn main() {
    env_logger::init();

    let mut widget = ring()
        .range(0.0, 100.0)
        .bounds(Rect::new(0.0, 0.0, 120.0, 120.0))
        .config(
            RingConfig::new()
                .style(RingStyle::Inside)
                .start_angle(-90.0)
                .timing(TimingFunction::EaseInOut)
                .label(LabelStyle::new(LabelFormat::Percent { decimals: 0 })),
        );

    widget.subscribe(|event| {
        if !matches!(event, RingEvent::ValueChanged(_)) {
            println!("event: {:?}", event);
        }
    });

    widget.start_progress_with(100.0, Duration::from_secs(2), || {
        println!("progress complete");
    });

    let started = Instant::now();
    let mut paused_once = false;
    loop {
        let active = widget.tick();

        if widget.needs_paint() {
            let mut ctx = PaintContext::new();
            widget.paint(&mut ctx);
            print_frame(widget.current_value(), ctx.commands().len());
            widget.clear_dirty();
        }

        if !paused_once && started.elapsed() > Duration::from_millis(800) {
            paused_once = true;
            widget.pause_progress();
            println!("-- paused for 500ms of wall-clock time --");
            std::thread::sleep(Duration::from_millis(500));
            widget.continue_progress();
        }

        if !active {
            break;
        }
        std::thread::sleep(Duration::from_millis(16));
    }
}

fn print_frame(value: f32, commands: usize) {
    let filled = ((value / 5.0).round() as usize).min(20);
    println!(
        "[{}{}] {:>5.1}  ({} draw commands)",
        "#".repeat(filled),
        "-".repeat(20 - filled),
        value,
        commands
    );
}
