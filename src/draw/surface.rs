// src/draw/surface.rs
//
// The drawing surface the renderers talk to: a canvas-style 2D context with
// y growing downward, a save/restore transform stack, and paths made of
// lines and quadratic curves.

use crate::models::{LineCap, LineJoin, Rect, ScreenPoint, TextStyle};
use nannou::color::{rgba, Rgba};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(ScreenPoint),
    LineTo(ScreenPoint),
    QuadTo { ctrl: ScreenPoint, to: ScreenPoint },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.ops.push(PathOp::MoveTo(ScreenPoint::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.ops.push(PathOp::LineTo(ScreenPoint::new(x, y)));
        self
    }

    pub fn quad_to(mut self, ctrl_x: f64, ctrl_y: f64, x: f64, y: f64) -> Self {
        self.ops.push(PathOp::QuadTo {
            ctrl: ScreenPoint::new(ctrl_x, ctrl_y),
            to: ScreenPoint::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.ops.push(PathOp::Close);
        self
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Flattens the path into polylines, one per sub-path. Quadratic curves
    /// are sampled at `curve_steps` points.
    pub fn flatten(&self, curve_steps: usize) -> Vec<Vec<ScreenPoint>> {
        let mut polylines: Vec<Vec<ScreenPoint>> = Vec::new();
        let mut current: Vec<ScreenPoint> = Vec::new();

        for op in &self.ops {
            match *op {
                PathOp::MoveTo(point) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(point);
                }
                PathOp::LineTo(point) => current.push(point),
                PathOp::QuadTo { ctrl, to } => {
                    let from = current.last().copied().unwrap_or(ctrl);
                    let steps = curve_steps.max(1);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        let u = 1.0 - t;
                        current.push(ScreenPoint::new(
                            u * u * from.x + 2.0 * u * t * ctrl.x + t * t * to.x,
                            u * u * from.y + 2.0 * u * t * ctrl.y + t * t * to.y,
                        ));
                    }
                }
                PathOp::Close => {
                    if let Some(first) = current.first().copied() {
                        current.push(first);
                    }
                }
            }
        }

        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// 0.0 at the gradient start, 1.0 at its end.
    pub offset: f64,
    pub color: Rgba,
}

/// A color ramp between two points, in the coordinate frame the stroke is
/// issued in.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    pub fn add_color_stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self.stops
            .sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(std::cmp::Ordering::Equal));
        self
    }

    /// Color at `point`, projected onto the gradient axis. Outside the axis
    /// the end stops extend.
    pub fn color_at(&self, point: ScreenPoint) -> Rgba {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let axis = dx * dx + dy * dy;
        let t = if axis == 0.0 {
            0.0
        } else {
            ((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / axis
        };
        self.color_at_offset(t)
    }

    pub fn color_at_offset(&self, t: f64) -> Rgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return rgba(0.0, 0.0, 0.0, 0.0),
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                let k = if span == 0.0 {
                    1.0
                } else {
                    ((t - a.offset) / span) as f32
                };
                return rgba(
                    a.color.red + (b.color.red - a.color.red) * k,
                    a.color.green + (b.color.green - a.color.green) * k,
                    a.color.blue + (b.color.blue - a.color.blue) * k,
                    a.color.alpha + (b.color.alpha - a.color.alpha) * k,
                );
            }
        }
        last.color
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    LinearGradient(LinearGradient),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

/// A 2D drawing surface. Coordinates are pixels with the origin at the
/// top-left corner and y growing downward; `translate` and `rotate` apply to
/// everything drawn until the matching `restore`.
pub trait Surface {
    /// The full drawable area.
    fn bounds(&self) -> Rect;

    fn clear_rect(&mut self, rect: Rect);

    fn clear(&mut self) {
        let bounds = self.bounds();
        self.clear_rect(bounds);
    }

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);

    fn stroke_path(&mut self, path: &Path, paint: &Paint, style: &StrokeStyle);
    fn fill_path(&mut self, path: &Path, color: Rgba);

    fn draw_image(&mut self, source: &str, rect: Rect);

    /// Draws `text` with its baseline starting at `at`.
    fn fill_text(&mut self, text: &str, at: ScreenPoint, style: &TextStyle);
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64;
}
