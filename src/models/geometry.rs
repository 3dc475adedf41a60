// src/models/geometry.rs
// Some types for working with connection geometry

use serde::{Deserialize, Serialize};

/// A point in the authored (logical) coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Coordinate) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A point on a drawing surface, in pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.max_x() >= other.max_x()
            && self.max_y() >= other.max_y()
    }
}

/// Which corner the logical y axis starts from.
/// `Top`: y grows downward, like the drawing surface.
/// `Bottom`: y grows upward, so the vertical component is flipped when
/// measuring angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    #[default]
    Top,
    Bottom,
}

/// Rigid 2D transform: rotate (radians) then translate.
/// Composes the way a canvas context composes `translate` and `rotate` calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform2D {
    pub translation: ScreenPoint,
    pub rotation: f64,
}

impl Transform2D {
    pub fn then_translate(&self, dx: f64, dy: f64) -> Transform2D {
        let (sin, cos) = self.rotation.sin_cos();
        Transform2D {
            translation: ScreenPoint::new(
                self.translation.x + dx * cos - dy * sin,
                self.translation.y + dx * sin + dy * cos,
            ),
            rotation: self.rotation,
        }
    }

    pub fn then_rotate(&self, angle: f64) -> Transform2D {
        Transform2D {
            translation: self.translation,
            rotation: self.rotation + angle,
        }
    }

    pub fn apply_to_point(&self, point: ScreenPoint) -> ScreenPoint {
        let (sin, cos) = self.rotation.sin_cos();
        ScreenPoint::new(
            self.translation.x + point.x * cos - point.y * sin,
            self.translation.y + point.x * sin + point.y * cos,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform2D::default()
    }
}
