// src/models/marker.rs

use super::{Rect, TextStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: LabelPosition,
    pub style: TextStyle,
    /// Gap between the image edge and the text.
    pub gap: f64,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: LabelPosition::Bottom,
            style: TextStyle::default(),
            gap: 5.0,
        }
    }
}

/// An icon anchored on the diagram, with an optional text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Image location handed to the host (file path or URL).
    pub image: String,
    pub bounds: Rect,
    pub label: Option<Label>,
}

impl Marker {
    pub fn new(image: impl Into<String>, bounds: Rect) -> Self {
        Self {
            image: image.into(),
            bounds,
            label: None,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}
