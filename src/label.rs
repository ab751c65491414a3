//! Overlay label formatting.
//!
//! A [`LabelFormat`] is the policy object that turns the current ring
//! value into display text. The progress ring typically shows a percent
//! or raw value; the timer ring shows clock-style elapsed or remaining
//! time.

use crate::geometry::sweep_fraction;

/// How the ring value renders as label text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelFormat {
    /// Value as a percentage of the range, e.g. `42%`
    Percent {
        /// Fractional digits to show
        decimals: usize,
    },
    /// Raw value, optionally suffixed with the range maximum, e.g. `42/100`
    Value {
        decimals: usize,
        show_max: bool,
    },
    /// Clock-style time, treating the value as whole seconds
    Clock {
        /// Render `H:MM:SS` instead of `MM:SS`
        show_hours: bool,
        /// Show time remaining to the range maximum instead of the value
        count_down: bool,
    },
}

/// Render `value` within `[min, max]` according to `format`.
pub fn format_label(format: &LabelFormat, value: f32, min: f32, max: f32) -> String {
    match format {
        LabelFormat::Percent { decimals } => {
            let percent = sweep_fraction(value, min, max) * 100.0;
            format!("{:.*}%", decimals, percent)
        }
        LabelFormat::Value { decimals, show_max } => {
            if *show_max {
                format!("{:.*}/{:.*}", decimals, value, decimals, max)
            } else {
                format!("{:.*}", decimals, value)
            }
        }
        LabelFormat::Clock {
            show_hours,
            count_down,
        } => {
            let seconds = if *count_down { max - value } else { value };
            format_clock(seconds.max(0.0).round() as u64, *show_hours)
        }
    }
}

fn format_clock(total_secs: u64, show_hours: bool) -> String {
    let s = total_secs % 60;
    if show_hours {
        let h = total_secs / 3600;
        let m = (total_secs % 3600) / 60;
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        let m = total_secs / 60;
        format!("{:02}:{:02}", m, s)
    }
}
