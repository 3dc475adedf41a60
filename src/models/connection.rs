// src/models/connection.rs

use super::{ArrowDirection, Coordinate, FlowStyle, LineStyle};

/// One authored polyline between markers. The segment data derived from
/// `points` lives in the `SegmentGraph`, indexed by the connection's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub points: Vec<Coordinate>,
    pub arrow_direction: ArrowDirection,
    pub line: LineStyle,
    pub flow: FlowStyle,
}

impl Connection {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self {
            points,
            arrow_direction: ArrowDirection::None,
            line: LineStyle::default(),
            flow: FlowStyle::default(),
        }
    }

    pub fn with_arrow(mut self, direction: ArrowDirection) -> Self {
        self.arrow_direction = direction;
        self
    }

    pub fn with_line_style(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn with_flow_style(mut self, flow: FlowStyle) -> Self {
        self.flow = flow;
        self
    }
}
