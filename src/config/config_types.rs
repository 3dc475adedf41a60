// src/config/config_types.rs
//
// Config types for the app (config.toml) and the authored scene (scene.json).
// Scene options are all optional; `resolve` fills in the defaults once.

use crate::error::Result;
use crate::models::{
    ArrowDirection, Connection, Coordinate, FlowStyle, Label, LabelPosition, LineCap, LineJoin,
    LineStyle, Marker, Origin, Rect, TextStyle,
};
use crate::utilities::color::{from_rgb_triple, parse_color};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: String,
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub scene_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default = "default_step_size")]
    pub step_size: u32,
    #[serde(default = "default_flow_length")]
    pub flow_length: u32,
    #[serde(default)]
    pub origin: Origin,
    /// Logical coordinate that maps to the window's top-left pixel.
    #[serde(default)]
    pub reference: Coordinate,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            step_size: default_step_size(),
            flow_length: default_flow_length(),
            origin: Origin::Top,
            reference: Coordinate::default(),
        }
    }
}

fn default_background() -> String {
    "#1e1e1e".to_string()
}

fn default_fps() -> f64 {
    24.0
}

fn default_step_size() -> u32 {
    60
}

fn default_flow_length() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

/************************* Scene ********************/

/// Markers and connections ready for the renderer.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub markers: Vec<Marker>,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

impl SceneConfig {
    pub fn resolve(&self) -> Result<Scene> {
        Ok(Scene {
            markers: self
                .markers
                .iter()
                .map(MarkerConfig::resolve)
                .collect::<Result<_>>()?,
            connections: self
                .connections
                .iter()
                .map(ConnectionConfig::resolve)
                .collect::<Result<_>>()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkerConfig {
    pub image: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub label: Option<LabelConfig>,
}

impl MarkerConfig {
    pub fn resolve(&self) -> Result<Marker> {
        let mut marker = Marker::new(
            self.image.clone(),
            Rect::new(self.x, self.y, self.width, self.height),
        );
        if let Some(label) = &self.label {
            marker.label = label.resolve()?;
        }
        Ok(marker)
    }
}

#[derive(Debug, Deserialize)]
pub struct LabelConfig {
    pub text: String,
    #[serde(default = "default_true")]
    pub show: bool,
    #[serde(default)]
    pub position: LabelPosition,
    /// Space between the image and the text.
    pub gap: Option<f64>,
    #[serde(default)]
    pub style: TextStyleConfig,
}

impl LabelConfig {
    /// None when the label is configured but hidden.
    pub fn resolve(&self) -> Result<Option<Label>> {
        if !self.show {
            return Ok(None);
        }
        let mut label = Label::new(self.text.clone());
        label.position = self.position;
        label.style = self.style.resolve()?;
        if let Some(gap) = self.gap {
            label.gap = gap;
        }
        Ok(Some(label))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TextStyleConfig {
    pub color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
}

impl TextStyleConfig {
    pub fn resolve(&self) -> Result<TextStyle> {
        let defaults = TextStyle::default();
        Ok(TextStyle {
            font_family: self.font_family.clone().unwrap_or(defaults.font_family),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            font_weight: self.font_weight.clone().unwrap_or(defaults.font_weight),
            color: match &self.color {
                Some(color) => parse_color(color)?,
                None => defaults.color,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectionConfig {
    pub points: Vec<Coordinate>,
    #[serde(default)]
    pub arrow_direction: ArrowDirection,
    #[serde(default)]
    pub line: LineConfig,
    #[serde(default)]
    pub flow: FlowConfig,
}

impl ConnectionConfig {
    pub fn resolve(&self) -> Result<Connection> {
        Ok(Connection::new(self.points.clone())
            .with_arrow(self.arrow_direction)
            .with_line_style(self.line.resolve()?)
            .with_flow_style(self.flow.resolve()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LineConfig {
    pub width: Option<f64>,
    pub arrow_size: Option<f64>,
    pub arrow_round_size: Option<f64>,
    pub color: Option<String>,
    pub cap: Option<LineCap>,
    pub join: Option<LineJoin>,
    pub marker_gap: Option<f64>,
}

impl LineConfig {
    pub fn resolve(&self) -> Result<LineStyle> {
        let defaults = LineStyle::default();
        Ok(LineStyle {
            width: self.width.unwrap_or(defaults.width),
            arrow_size: self.arrow_size.unwrap_or(defaults.arrow_size),
            arrow_round_size: self.arrow_round_size.unwrap_or(defaults.arrow_round_size),
            color: match &self.color {
                Some(color) => parse_color(color)?,
                None => defaults.color,
            },
            cap: self.cap.unwrap_or(defaults.cap),
            join: self.join.unwrap_or(defaults.join),
            marker_gap: self.marker_gap.unwrap_or(defaults.marker_gap),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FlowConfig {
    pub enabled: Option<bool>,
    pub width: Option<f64>,
    /// 0-255 channels; the flow is always drawn opaque at its head.
    pub color: Option<[u8; 3]>,
    pub cap: Option<LineCap>,
}

impl FlowConfig {
    pub fn resolve(&self) -> FlowStyle {
        let defaults = FlowStyle::default();
        FlowStyle {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            width: self.width.unwrap_or(defaults.width),
            color: self.color.map(from_rgb_triple).unwrap_or(defaults.color),
            cap: self.cap.unwrap_or(defaults.cap),
        }
    }
}
