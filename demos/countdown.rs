//! Terminal simulation of a countdown timer ring.
//!
//! Runs a five second timer with one second ticks, suspending the "app"
//! partway through to show that backgrounded time is not counted.

use std::time::Duration;

use annular::prelude::*;

fn main() {
    env_logger::init();

    let mut widget = ring().bounds(Rect::new(0.0, 0.0, 96.0, 96.0)).config(
        RingConfig::new()
            .start_angle(-90.0)
            .clockwise(false)
            .label(LabelStyle::new(LabelFormat::Clock {
                show_hours: false,
                count_down: true,
            })),
    );

    widget.start_timer(
        Duration::from_secs(5),
        Duration::from_secs(1),
        |tick| {
            println!(
                "tick: {:?} elapsed, {:?} remaining{}",
                tick.elapsed,
                tick.remaining,
                if tick.is_final { " (final)" } else { "" }
            );
        },
        || println!("timer done"),
    );

    let mut suspended_once = false;
    loop {
        let active = widget.tick();

        if widget.needs_paint() {
            let mut ctx = PaintContext::new();
            widget.paint(&mut ctx);
            if let Some(DrawCommand::Label { text, .. }) = ctx
                .commands()
                .iter()
                .find(|cmd| matches!(cmd, DrawCommand::Label { .. }))
            {
                println!("label: {}", text);
            }
            widget.clear_dirty();
        }

        if !suspended_once && widget.current_value() >= 2.0 {
            suspended_once = true;
            println!("-- host suspending for 2s --");
            widget.on_host_will_suspend();
            std::thread::sleep(Duration::from_secs(2));
            widget.on_host_did_resume();
        }

        if !active {
            break;
        }
        std::thread::sleep(Duration::from_millis(16));
    }
}
