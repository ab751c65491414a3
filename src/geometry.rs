//! Arc geometry for the ring widget.
//!
//! Pure functions mapping a bounded value and a [`RingConfig`]-shaped set
//! of inputs to arc spans and stroke radii. Everything here is
//! deterministic and allocation-free; the widget calls it on every frame
//! while an animation is in flight.
//!
//! Angles are in degrees, measured from three o'clock, increasing
//! clockwise (screen space, y-down).

use crate::style::RingStyle;

/// One stroked arc: where it starts, where it ends, how far from center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSpan {
    /// Start angle in degrees
    pub start_angle: f32,
    /// End angle in degrees
    pub end_angle: f32,
    /// Distance from the widget center to the stroke centerline
    pub radius: f32,
}

impl ArcSpan {
    /// Signed angular extent in degrees; negative when the arc runs
    /// counterclockwise.
    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }
}

/// Stroke dimensions extracted from the widget's config and bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingMetrics {
    /// Diameter available to the widget (min side of its bounds)
    pub size: f32,
    /// Outer (track) stroke width
    pub outer_width: f32,
    /// Inner (progress) stroke width
    pub inner_width: f32,
    /// Clearance between rings for [`RingStyle::Inside`]
    pub spacing: f32,
    /// Knob diameter, zero when no knob is drawn
    pub knob_diameter: f32,
}

/// Fraction of the range the value covers, in [0, 1] for in-range values.
///
/// A zero-width range maps everything to 0 rather than dividing by zero.
pub fn sweep_fraction(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// Angular distance from `start` to `end` going clockwise, handling
/// wraparound through 360/0 when `start > end`.
pub fn angular_span(start: f32, end: f32) -> f32 {
    if start <= end {
        end - start
    } else {
        360.0 - start + end
    }
}

/// Centerline radius of the outer (track) ring.
///
/// The stroke hugs the widget edge; a knob wider than the stroke pushes
/// the centerline inward so the knob never clips, and a border shrinks it
/// further by the border width.
pub fn outer_radius(metrics: &RingMetrics, style: &RingStyle) -> f32 {
    let half = metrics.size / 2.0;
    let edge = metrics.outer_width.max(metrics.knob_diameter) / 2.0;
    let radius = match style {
        RingStyle::Bordered { width, .. } => half - edge - width,
        _ => half - edge,
    };
    radius.max(0.0)
}

/// Centerline radius of the inner (progress) ring.
///
/// [`RingStyle::Inside`] nests the inner stroke strictly inside the outer
/// one, reserving `2 * outer_width + spacing` of clearance; every other
/// style shares the outer centerline and differs only in stroke pattern.
pub fn inner_radius(metrics: &RingMetrics, style: &RingStyle) -> f32 {
    match style {
        RingStyle::Inside => {
            let half = metrics.size / 2.0;
            let clearance = 2.0 * metrics.outer_width + metrics.spacing;
            (half - clearance - metrics.inner_width / 2.0).max(0.0)
        }
        _ => outer_radius(metrics, style),
    }
}

/// Arc span of the inner ring for a value within `[min, max]`.
///
/// Full-circle rings sweep `fraction * 360` degrees from `start_angle`;
/// partial rings sweep the same fraction of the clockwise span between
/// `start_angle` and `end_angle`. Counterclockwise rings subtract the
/// sweep instead of adding it.
#[allow(clippy::too_many_arguments)]
pub fn inner_arc(
    value: f32,
    min: f32,
    max: f32,
    start_angle: f32,
    end_angle: f32,
    full_circle: bool,
    clockwise: bool,
    metrics: &RingMetrics,
    style: &RingStyle,
) -> ArcSpan {
    let fraction = sweep_fraction(value, min, max);
    let span = if full_circle {
        360.0
    } else {
        angular_span(start_angle, end_angle)
    };
    let sweep = fraction * span;
    let end = if clockwise {
        start_angle + sweep
    } else {
        start_angle - sweep
    };
    ArcSpan {
        start_angle,
        end_angle: end,
        radius: inner_radius(metrics, style),
    }
}

/// Arc span of the outer (track) ring.
///
/// Spans the whole circle when `full_circle` is set, otherwise the
/// clockwise span from `start_angle` to `end_angle` (mirrored for
/// counterclockwise rings so both strokes overlap).
pub fn outer_arc(
    start_angle: f32,
    end_angle: f32,
    full_circle: bool,
    clockwise: bool,
    metrics: &RingMetrics,
    style: &RingStyle,
) -> ArcSpan {
    let span = if full_circle {
        360.0
    } else {
        angular_span(start_angle, end_angle)
    };
    let end = if clockwise {
        start_angle + span
    } else {
        start_angle - span
    };
    ArcSpan {
        start_angle,
        end_angle: end,
        radius: outer_radius(metrics, style),
    }
}
