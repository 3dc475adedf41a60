// src/models/style.rs
//
// Resolved drawing styles. Every field carries its default here, so the
// renderers never deal with missing options.

use crate::utilities::color::from_rgb_triple;
use nannou::color::Rgba;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LINE_COLOR: [u8; 3] = [0xB8, 0x35, 0x38];
pub const DEFAULT_LABEL_COLOR: [u8; 3] = [0x66, 0x66, 0x66];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Where the arrowhead at the end of a connection points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Left,
    Right,
    Up,
    Down,
    #[default]
    None,
}

/// Static body and arrowhead style of one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub arrow_size: f64,
    pub arrow_round_size: f64,
    pub color: Rgba,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Gap between a marker and the line ends; also where the flow starts.
    pub marker_gap: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 3.0,
            arrow_size: 8.0,
            arrow_round_size: 3.0,
            color: from_rgb_triple(DEFAULT_LINE_COLOR),
            cap: LineCap::Round,
            join: LineJoin::Round,
            marker_gap: 6.0,
        }
    }
}

/// Animated flow style of one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowStyle {
    pub enabled: bool,
    pub width: f64,
    pub color: Rgba,
    pub cap: LineCap,
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 3.0,
            color: from_rgb_triple([255, 255, 255]),
            cap: LineCap::Round,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: Rgba,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 13.0,
            font_weight: "normal".to_string(),
            color: from_rgb_triple(DEFAULT_LABEL_COLOR),
        }
    }
}
