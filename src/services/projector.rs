// src/services/projector.rs
//
// Logical coordinates -> surface pixels, plus each segment's travel angle.

use super::segment_graph::{ScreenSegment, SegmentGraph};
use crate::models::{Coordinate, Origin, ScreenPoint};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy)]
pub struct ScreenProjector {
    /// The surface's own origin, expressed in logical coordinates.
    reference: Coordinate,
    origin: Origin,
}

impl Default for ScreenProjector {
    fn default() -> Self {
        Self::new(Coordinate::default(), Origin::Top)
    }
}

impl ScreenProjector {
    pub fn new(reference: Coordinate, origin: Origin) -> Self {
        Self { reference, origin }
    }

    /// Projects every segment that has no screen data yet, walking each
    /// connection in path order. Returns how many segments were projected.
    /// Already projected segments keep their angle and display length.
    pub fn project(&self, graph: &mut SegmentGraph) -> usize {
        let mut updates = Vec::new();

        for connection in 0..graph.connection_count() {
            let mut previous_end: Option<ScreenPoint> = None;

            for id in graph.connection_segments(connection) {
                let Some(segment) = graph.segment(*id) else {
                    previous_end = None;
                    continue;
                };

                if let Some(screen) = segment.screen() {
                    previous_end = Some(screen.end);
                    continue;
                }

                // interior joints reuse the previous end pixel exactly
                let start = previous_end.unwrap_or_else(|| self.to_pixel(segment.start));
                let end = self.to_pixel(segment.end);
                let screen = ScreenSegment {
                    start,
                    end,
                    angle: self.angle(start, end),
                    display_length: segment.length,
                };

                previous_end = Some(end);
                updates.push((*id, screen));
            }
        }

        let projected = updates.len();
        for (id, screen) in updates {
            graph.set_screen(id, screen);
        }

        tracing::debug!(projected, "segments projected to screen space");
        projected
    }

    /// `point - reference`, rounded to whole pixels (halves round up).
    pub fn to_pixel(&self, point: Coordinate) -> ScreenPoint {
        ScreenPoint::new(
            round_half_up(point.x - self.reference.x),
            round_half_up(point.y - self.reference.y),
        )
    }

    /// Direction of travel from `from` to `to`, in 0..2pi.
    pub fn angle(&self, from: ScreenPoint, to: ScreenPoint) -> f64 {
        let flip = match self.origin {
            Origin::Top => 1.0,
            Origin::Bottom => -1.0,
        };
        let dx = to.x - from.x;
        let dy = (to.y - from.y) * flip;
        dy.atan2(dx).rem_euclid(TAU)
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
