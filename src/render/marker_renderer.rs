// src/render/marker_renderer.rs
//
// Marker icons and their text labels.

use crate::draw::Surface;
use crate::models::{Coordinate, Label, LabelPosition, Marker, Rect, ScreenPoint};
use crate::services::ScreenProjector;

pub struct MarkerRenderer {
    projector: ScreenProjector,
}

impl MarkerRenderer {
    pub fn new(projector: ScreenProjector) -> Self {
        Self { projector }
    }

    /// Marker bounds on the surface.
    pub fn screen_bounds(&self, marker: &Marker) -> Rect {
        let corner = self
            .projector
            .to_pixel(Coordinate::new(marker.bounds.x, marker.bounds.y));
        Rect::new(corner.x, corner.y, marker.bounds.width, marker.bounds.height)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, marker: &Marker) {
        let bounds = self.screen_bounds(marker);
        surface.draw_image(&marker.image, bounds);

        if let Some(label) = &marker.label {
            let width = surface.measure_text(&label.text, &label.style);
            let at = label_origin(&bounds, label, width);
            surface.fill_text(&label.text, at, &label.style);
        }
    }

    pub fn draw_all<S: Surface>(&self, surface: &mut S, markers: &[Marker]) {
        surface.save();
        for marker in markers {
            self.draw(surface, marker);
        }
        surface.restore();
    }
}

/// Baseline start of a label of measured `text_width` around `bounds`.
pub fn label_origin(bounds: &Rect, label: &Label, text_width: f64) -> ScreenPoint {
    let center = bounds.center();
    let size = label.style.font_size;
    let gap = label.gap;

    match label.position {
        LabelPosition::Top => ScreenPoint::new(center.x - text_width / 2.0, bounds.y - gap - size),
        LabelPosition::Bottom => {
            ScreenPoint::new(center.x - text_width / 2.0, bounds.max_y() + gap + size)
        }
        LabelPosition::Left => ScreenPoint::new(bounds.x - text_width - gap, center.y - size / 2.0),
        LabelPosition::Right => ScreenPoint::new(bounds.max_x() + gap, center.y - size / 2.0),
    }
}
