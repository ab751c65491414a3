//! Draw command boundary between the ring widget and the host renderer.
//!
//! The widget never draws; it records [`DrawCommand`]s into a
//! [`PaintContext`] and the host's rendering backend replays them with
//! whatever stroke/text primitives it has. Arc paths are handed over as
//! [`kurbo::Arc`] segments in the widget's local coordinate space.

use kurbo::{Arc, Point, Vec2};

use crate::geometry::ArcSpan;
use crate::style::GradientOptions;
use crate::widgets::Color;

/// Stroke end-cap shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat ends
    Butt,
    /// Rounded ends
    Round,
}

/// Border decoration around an arc stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcBorder {
    pub width: f32,
    pub color: Color,
}

/// A single draw operation in the widget's local coordinates.
#[derive(Clone, Debug)]
pub enum DrawCommand {
    /// Stroke an arc.
    ArcStroke {
        /// Arc path (angles in radians, kurbo convention)
        arc: Arc,
        /// Stroke width in logical pixels
        width: f32,
        /// Stroke color
        color: Color,
        /// End-cap shape
        cap: StrokeCap,
        /// Dash pattern lengths, `None` for a solid stroke
        dash: Option<Vec<f32>>,
        /// Gradient fill (overrides the solid color)
        gradient: Option<GradientOptions>,
        /// Optional border decoration
        border: Option<ArcBorder>,
    },

    /// Fill a circular knob.
    Knob {
        center: Point,
        radius: f32,
        color: Color,
    },

    /// Draw the overlay label centered on a point.
    Label {
        text: String,
        center: Point,
        color: Color,
        font_size: f32,
    },
}

/// Convert an [`ArcSpan`] (degrees, widget convention) to a kurbo arc
/// centered on `center`.
pub fn arc_path(span: &ArcSpan, center: (f32, f32)) -> Arc {
    Arc {
        center: Point::new(center.0 as f64, center.1 as f64),
        radii: Vec2::new(span.radius as f64, span.radius as f64),
        start_angle: (span.start_angle as f64).to_radians(),
        sweep_angle: (span.sweep() as f64).to_radians(),
        x_rotation: 0.0,
    }
}

/// Point on a circle of `radius` around `center` at `angle_deg`.
pub fn point_at(center: (f32, f32), radius: f32, angle_deg: f32) -> Point {
    let radians = (angle_deg as f64).to_radians();
    Point::new(
        center.0 as f64 + radius as f64 * radians.cos(),
        center.1 as f64 + radius as f64 * radians.sin(),
    )
}

/// Recorder the widget paints into; the host drains it each frame.
#[derive(Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Record a solid arc stroke.
    pub fn draw_arc(
        &mut self,
        span: &ArcSpan,
        center: (f32, f32),
        width: f32,
        color: Color,
        cap: StrokeCap,
    ) {
        self.push(DrawCommand::ArcStroke {
            arc: arc_path(span, center),
            width,
            color,
            cap,
            dash: None,
            gradient: None,
            border: None,
        });
    }

    pub fn draw_knob(&mut self, center: Point, radius: f32, color: Color) {
        self.push(DrawCommand::Knob {
            center,
            radius,
            color,
        });
    }

    pub fn draw_label(&mut self, text: String, center: Point, color: Color, font_size: f32) {
        self.push(DrawCommand::Label {
            text,
            center,
            color,
            font_size,
        });
    }

    /// Commands recorded so far, in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands for submission.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}
