// src/draw/nannou_paint.rs
//
// Replays a DisplayList onto a nannou Draw. Surface coordinates have their
// origin at the window's top-left corner with y down; nannou's origin is the
// window center with y up.

use super::display_list::{text_width, DisplayList, DrawOp};
use super::surface::{Paint, Path, StrokeStyle};
use crate::models::{LineCap, LineJoin, Rect, ScreenPoint, TextStyle, Transform2D};
use nannou::color::Rgba;
use nannou::draw::Draw;
use nannou::geom::Rect as WindowRect;
use nannou::prelude::{pt2, App, Point2};
use nannou::wgpu;
use std::collections::HashMap;

const CURVE_STEPS: usize = 12;
// gradient strokes are split into pieces this long so the colors can vary
const GRADIENT_STEP: f64 = 2.0;

/// Images decoded once and reused across frames. Failed loads are remembered
/// so a missing file is reported a single time.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, Option<wgpu::Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, app: &App, source: &str) -> Option<&wgpu::Texture> {
        self.textures
            .entry(source.to_string())
            .or_insert_with(|| match wgpu::Texture::from_path(app, source) {
                Ok(texture) => {
                    tracing::debug!(source, "marker image loaded");
                    Some(texture)
                }
                Err(e) => {
                    tracing::warn!(source, error = %e, "failed to load marker image");
                    None
                }
            })
            .as_ref()
    }
}

pub struct NannouPainter {
    background: Rgba,
    textures: TextureCache,
}

impl NannouPainter {
    pub fn new(background: Rgba) -> Self {
        Self {
            background,
            textures: TextureCache::new(),
        }
    }

    /// Draws every recorded op, in order, inside `window`.
    pub fn paint(&mut self, app: &App, draw: &Draw, window: WindowRect, list: &DisplayList) {
        for op in list.ops() {
            match op {
                DrawOp::Stroke {
                    path,
                    paint,
                    style,
                    transform,
                } => stroke(draw, window, path, paint, style, transform),
                DrawOp::Fill {
                    path,
                    color,
                    transform,
                } => fill(draw, window, path, *color, transform),
                DrawOp::Image {
                    source,
                    rect,
                    transform,
                } => self.image(app, draw, window, source, rect, transform),
                DrawOp::Text {
                    text,
                    at,
                    style,
                    transform,
                } => label(draw, window, text, *at, style, transform),
                DrawOp::Clear { rect } => {
                    let center = to_window(window, rect.center());
                    draw.rect()
                        .x_y(center.x, center.y)
                        .w_h(rect.width as f32, rect.height as f32)
                        .color(self.background);
                }
            }
        }
    }

    fn image(
        &mut self,
        app: &App,
        draw: &Draw,
        window: WindowRect,
        source: &str,
        rect: &Rect,
        transform: &Transform2D,
    ) {
        let Some(texture) = self.textures.get(app, source) else {
            return;
        };
        let center = to_window(window, transform.apply_to_point(rect.center()));
        draw.texture(texture)
            .x_y(center.x, center.y)
            .w_h(rect.width as f32, rect.height as f32)
            .rotate(-transform.rotation as f32);
    }
}

fn stroke(
    draw: &Draw,
    window: WindowRect,
    path: &Path,
    paint: &Paint,
    style: &StrokeStyle,
    transform: &Transform2D,
) {
    for polyline in path.flatten(CURVE_STEPS) {
        let line = draw.polyline().weight(style.width as f32);
        let line = match style.cap {
            LineCap::Butt => line.caps_butt(),
            LineCap::Round => line.caps_round(),
            LineCap::Square => line.caps_square(),
        };
        let line = match style.join {
            LineJoin::Miter => line.join_miter(),
            LineJoin::Round => line.join_round(),
            LineJoin::Bevel => line.join_bevel(),
        };

        match paint {
            Paint::Solid(color) => {
                let points: Vec<Point2> = polyline
                    .iter()
                    .map(|p| to_window(window, transform.apply_to_point(*p)))
                    .collect();
                line.points(points).color(*color);
            }
            Paint::LinearGradient(gradient) => {
                // colors come from the untransformed points, like a canvas gradient
                let colored: Vec<(Point2, Rgba)> = subdivide(&polyline, GRADIENT_STEP)
                    .into_iter()
                    .map(|p| {
                        (
                            to_window(window, transform.apply_to_point(p)),
                            gradient.color_at(p),
                        )
                    })
                    .collect();
                line.points_colored(colored);
            }
        }
    }
}

fn fill(draw: &Draw, window: WindowRect, path: &Path, color: Rgba, transform: &Transform2D) {
    for polygon in path.flatten(CURVE_STEPS) {
        let points: Vec<Point2> = polygon
            .iter()
            .map(|p| to_window(window, transform.apply_to_point(*p)))
            .collect();
        if points.len() > 2 {
            draw.polygon().points(points).color(color);
        }
    }
}

fn label(
    draw: &Draw,
    window: WindowRect,
    text: &str,
    at: ScreenPoint,
    style: &TextStyle,
    transform: &Transform2D,
) {
    let font_size = style.font_size.max(1.0);
    let (center, width) = label_box(text, at, font_size);
    let center = to_window(window, transform.apply_to_point(center));

    draw.text(text)
        .font_size(font_size.round() as u32)
        .x_y(center.x, center.y)
        .w_h(width as f32, font_size as f32)
        .left_justify()
        .align_text_bottom()
        .color(style.color);
}

/// Centre and width of the box nannou lays a label out in. The box starts at
/// `at`, its bottom sits on the baseline, and it is one glyph wider than the
/// measured text so the last word never wraps.
fn label_box(text: &str, at: ScreenPoint, font_size: f64) -> (ScreenPoint, f64) {
    let width = text_width(text, font_size) + font_size;
    let center = ScreenPoint::new(at.x + width / 2.0, at.y - font_size / 2.0);
    (center, width)
}

fn to_window(window: WindowRect, point: ScreenPoint) -> Point2 {
    pt2(window.left() + point.x as f32, window.top() - point.y as f32)
}

fn subdivide(points: &[ScreenPoint], step: f64) -> Vec<ScreenPoint> {
    let mut out = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = (b.x - a.x).hypot(b.y - a.y);
        let pieces = (length / step).ceil().max(1.0) as usize;
        for i in 0..pieces {
            let t = i as f64 / pieces as f64;
            out.push(ScreenPoint::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Surface;

    #[test]
    fn test_to_window_flips_y_around_center() {
        let window = WindowRect::from_w_h(200.0, 100.0);
        assert_eq!(to_window(window, ScreenPoint::new(0.0, 0.0)), pt2(-100.0, 50.0));
        assert_eq!(to_window(window, ScreenPoint::new(100.0, 50.0)), pt2(0.0, 0.0));
        assert_eq!(to_window(window, ScreenPoint::new(200.0, 100.0)), pt2(100.0, -50.0));
    }

    #[test]
    fn test_label_box_matches_measured_width() {
        let style = TextStyle::default();
        let measured = DisplayList::new(100.0, 100.0).measure_text("gateway", &style);

        let (center, width) = label_box("gateway", ScreenPoint::new(40.0, 80.0), style.font_size);
        assert_eq!(width, measured + style.font_size);
        assert_eq!(center.x - width / 2.0, 40.0);
        assert_eq!(center.y + style.font_size / 2.0, 80.0);
    }

    #[test]
    fn test_subdivide_keeps_endpoints() {
        let points = [ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 0.0)];
        let pieces = subdivide(&points, 2.0);
        assert_eq!(pieces.len(), 6);
        assert_eq!(pieces[0], points[0]);
        assert_eq!(pieces[5], points[1]);
        assert_eq!(pieces[1], ScreenPoint::new(2.0, 0.0));
    }
}
