//! Ring styling configuration.
//!
//! A [`RingConfig`] is the single value object the geometry and paint
//! paths read on every redraw. Nothing here is mirrored into a separate
//! drawing object; the widget hands the config (plus its bounds) to
//! [`crate::geometry`] at paint time.
//!
//! # Example
//! ```ignore
//! ring().config(
//!     RingConfig::new()
//!         .style(RingStyle::Inside)
//!         .start_angle(-90.0)
//!         .outer_width(12.0)
//!         .inner_color(Color::from_hex(0x3B82F6)),
//! )
//! ```

use crate::animation::TimingFunction;
use crate::label::LabelFormat;
use crate::widgets::Color;

/// How the inner (progress) ring sits relative to the outer (track) ring.
#[derive(Clone, Debug, PartialEq)]
pub enum RingStyle {
    /// Inner ring nested strictly inside the outer ring's stroke
    Inside,
    /// Inner ring drawn on the outer ring's centerline
    OnTop,
    /// Centerline stroke with a dash pattern (lengths in logical pixels)
    Dashed { pattern: Vec<f32> },
    /// Centerline stroke rendered as round dots
    Dotted,
    /// Centerline stroke filled with a gradient
    Gradient(GradientOptions),
    /// Outer ring decorated with a border
    Bordered { width: f32, color: Color },
}

/// Gradient fill for [`RingStyle::Gradient`].
///
/// `colors` and `locations` are consumed pairwise by the renderer; a
/// length mismatch degrades to the first color there, it is not validated
/// here.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientOptions {
    /// Gradient stops
    pub colors: Vec<Color>,
    /// Stop positions in [0, 1]
    pub locations: Vec<f32>,
    /// Direction of the gradient axis in degrees
    pub direction: f32,
}

impl GradientOptions {
    pub fn new(colors: Vec<Color>, locations: Vec<f32>) -> Self {
        Self {
            colors,
            locations,
            direction: 0.0,
        }
    }

    /// Set the gradient axis direction in degrees
    pub fn direction(mut self, degrees: f32) -> Self {
        self.direction = degrees;
        self
    }
}

/// A circular handle drawn at the head of the inner ring.
#[derive(Clone, Debug, PartialEq)]
pub struct KnobStyle {
    /// Knob diameter in logical pixels
    pub diameter: f32,
    /// Knob fill color
    pub color: Color,
}

impl KnobStyle {
    pub fn new(diameter: f32, color: Color) -> Self {
        Self {
            diameter: non_negative("knob diameter", diameter),
            color,
        }
    }
}

/// Overlay label configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// How the current value is rendered as text
    pub format: LabelFormat,
    /// Text color
    pub color: Color,
    /// Font size in logical pixels
    pub font_size: f32,
}

impl LabelStyle {
    pub fn new(format: LabelFormat) -> Self {
        Self {
            format,
            color: Color::WHITE,
            font_size: 18.0,
        }
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = non_negative("label font size", size);
        self
    }
}

/// Complete visual and animation configuration for one ring widget.
#[derive(Clone, Debug)]
pub struct RingConfig {
    /// Style variant affecting radius/stroke computation
    pub style: RingStyle,
    /// Angle where drawing starts, in degrees
    pub start_angle: f32,
    /// Angle where a partial ring ends, in degrees
    pub end_angle: f32,
    /// Whether the outer ring spans the full 360 degrees
    pub full_circle: bool,
    /// Direction the inner ring grows
    pub clockwise: bool,
    /// Outer (track) stroke width in logical pixels
    pub outer_width: f32,
    /// Inner (progress) stroke width in logical pixels
    pub inner_width: f32,
    /// Clearance between the rings for [`RingStyle::Inside`]
    pub spacing: f32,
    /// Outer ring color
    pub outer_color: Color,
    /// Inner ring color
    pub inner_color: Color,
    /// Optional handle at the head of the inner ring
    pub knob: Option<KnobStyle>,
    /// Optional overlay label; `None` hides the label
    pub label: Option<LabelStyle>,
    /// Timing curve applied to value transitions
    pub timing: TimingFunction,
}

impl RingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: RingStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the angle where drawing starts, in degrees
    pub fn start_angle(mut self, degrees: f32) -> Self {
        self.start_angle = degrees;
        self
    }

    /// Set the angle where a partial ring ends, in degrees
    pub fn end_angle(mut self, degrees: f32) -> Self {
        self.end_angle = degrees;
        self
    }

    /// Span the full circle (the default) or the start..end arc
    pub fn full_circle(mut self, full: bool) -> Self {
        self.full_circle = full;
        self
    }

    /// Grow the inner ring clockwise (the default) or counterclockwise
    pub fn clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn outer_width(mut self, width: f32) -> Self {
        self.outer_width = non_negative("outer width", width);
        self
    }

    pub fn inner_width(mut self, width: f32) -> Self {
        self.inner_width = non_negative("inner width", width);
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = non_negative("ring spacing", spacing);
        self
    }

    pub fn outer_color(mut self, color: impl Into<Color>) -> Self {
        self.outer_color = color.into();
        self
    }

    pub fn inner_color(mut self, color: impl Into<Color>) -> Self {
        self.inner_color = color.into();
        self
    }

    pub fn knob(mut self, knob: KnobStyle) -> Self {
        self.knob = Some(knob);
        self
    }

    pub fn label(mut self, label: LabelStyle) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the timing curve applied to value transitions
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            style: RingStyle::OnTop,
            start_angle: 0.0,
            end_angle: 360.0,
            full_circle: true,
            clockwise: true,
            outer_width: 10.0,
            inner_width: 8.0,
            spacing: 1.0,
            outer_color: Color::from_hex(0x2D2D3A),
            inner_color: Color::from_hex(0x5B8DEF),
            knob: None,
            label: None,
            timing: TimingFunction::EaseInOut,
        }
    }
}

/// Clamp a configured dimension to zero, logging the correction.
fn non_negative(what: &str, value: f32) -> f32 {
    if value < 0.0 {
        log::debug!("{} clamped from {} to 0", what, value);
        0.0
    } else {
        value
    }
}
