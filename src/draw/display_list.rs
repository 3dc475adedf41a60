// src/draw/display_list.rs
//
// A retained Surface. Calls are recorded together with the transform in
// effect, and the host replays the list every frame.

use super::surface::{Paint, Path, StrokeStyle, Surface};
use crate::models::{Rect, ScreenPoint, TextStyle, Transform2D};
use nannou::color::Rgba;

/// Rough advance width of one glyph, as a fraction of the font size.
pub const GLYPH_ADVANCE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Stroke {
        path: Path,
        paint: Paint,
        style: StrokeStyle,
        transform: Transform2D,
    },
    Fill {
        path: Path,
        color: Rgba,
        transform: Transform2D,
    },
    Image {
        source: String,
        rect: Rect,
        transform: Transform2D,
    },
    Text {
        text: String,
        at: ScreenPoint,
        style: TextStyle,
        transform: Transform2D,
    },
    /// A partial clear; a clear covering the whole surface drops the list instead.
    Clear { rect: Rect },
}

#[derive(Debug, Clone)]
pub struct DisplayList {
    bounds: Rect,
    ops: Vec<DrawOp>,
    transform: Transform2D,
    saved: Vec<Transform2D>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            ops: Vec::new(),
            transform: Transform2D::default(),
            saved: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// The transform new calls are recorded with.
    pub fn current_transform(&self) -> Transform2D {
        self.transform
    }

    /// Depth of the save stack; zero when every `save` has been restored.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
    }
}

impl Surface for DisplayList {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn clear_rect(&mut self, rect: Rect) {
        if rect.contains_rect(&self.bounds) {
            self.ops.clear();
        } else {
            self.ops.push(DrawOp::Clear { rect });
        }
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        // unbalanced restores are ignored, like a canvas context
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform.then_translate(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        self.transform = self.transform.then_rotate(angle);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, style: &StrokeStyle) {
        if path.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            paint: paint.clone(),
            style: *style,
            transform: self.transform,
        });
    }

    fn fill_path(&mut self, path: &Path, color: Rgba) {
        if path.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
            transform: self.transform,
        });
    }

    fn draw_image(&mut self, source: &str, rect: Rect) {
        self.ops.push(DrawOp::Image {
            source: source.to_string(),
            rect,
            transform: self.transform,
        });
    }

    fn fill_text(&mut self, text: &str, at: ScreenPoint, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
            transform: self.transform,
        });
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        text_width(text, style.font_size)
    }
}

/// Estimated width of `text` laid out in one line.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * GLYPH_ADVANCE
}
