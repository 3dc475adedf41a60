// src/render/flow_renderer.rs
//
// Per-frame flow strokes. Every connection shows a row of short fading
// strokes spaced `flow_length + step_size` apart; the global progress counter
// slides the row forward one pixel per rendered frame.

use crate::draw::{LinearGradient, Paint, Path, StrokeStyle, Surface};
use crate::models::{Connection, LineJoin, ScreenPoint};
use crate::services::{SegmentGraph, SegmentId};
use crate::utilities::color::with_alpha;
use nannou::color::Rgba;

/// Strokes shorter than this are not worth drawing.
const MIN_VISIBLE: f64 = 0.5;

/// One visible stroke, in the segment's local frame: x runs from the
/// segment's screen start along its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStroke {
    pub segment: SegmentId,
    /// Unclipped start of the stroke; the gradient always spans
    /// `cursor..cursor + flow_length`.
    pub cursor: f64,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRenderer {
    flow_length: f64,
    step_size: f64,
}

impl FlowRenderer {
    pub fn new(flow_length: u32, step_size: u32) -> Self {
        Self {
            flow_length: flow_length as f64,
            step_size: step_size as f64,
        }
    }

    pub fn flow_length(&self) -> f64 {
        self.flow_length
    }

    /// Distance between the starts of two consecutive strokes.
    pub fn step(&self) -> f64 {
        self.flow_length + self.step_size
    }

    /// Where the stroke row of one connection starts this frame.
    pub fn line_space(&self, progress: u32, marker_gap: f64) -> f64 {
        progress as f64 + marker_gap - self.flow_length
    }

    /// Visible strokes of one connection for the given line space, in
    /// segment order.
    pub fn plan_connection(
        &self,
        graph: &SegmentGraph,
        connection: usize,
        line_space: f64,
    ) -> Vec<FlowStroke> {
        let chain = graph.connection_segments(connection);
        let last = chain.len().saturating_sub(1);
        let step = self.step();

        let mut strokes = Vec::new();
        let mut all_length = 0.0;

        for (i, id) in chain.iter().enumerate() {
            let Some(segment) = graph.segment(*id) else {
                continue;
            };
            let length = segment.display_length();
            let before = all_length;
            all_length += length;

            // end segments shorter than one stroke stay empty
            if (i == 0 || i == last) && length < self.flow_length {
                continue;
            }
            if all_length < line_space {
                continue;
            }

            let remain = (before - line_space) % step;
            let mut cursor = if remain == 0.0 { 0.0 } else { -remain };

            while cursor < length {
                if let Some((from, to)) = self.clip(cursor, length) {
                    strokes.push(FlowStroke {
                        segment: *id,
                        cursor,
                        from,
                        to,
                    });
                }
                cursor += step;
            }
        }

        strokes
    }

    /// The part of a stroke starting at `cursor` that lies on a segment of
    /// `length`, or None when nothing visible is left.
    pub fn clip(&self, cursor: f64, length: f64) -> Option<(f64, f64)> {
        let flow = self.flow_length;

        if -flow < cursor && cursor < 0.0 {
            // entering from the segment start
            let right = (flow + cursor).min(length);
            (right >= MIN_VISIBLE).then_some((0.0, right))
        } else if cursor > 0.0 && cursor > length - flow {
            // leaving past the segment end
            (length - cursor >= MIN_VISIBLE).then_some((cursor, length))
        } else if cursor >= 0.0 && cursor <= length - flow {
            Some((cursor, cursor + flow))
        } else {
            None
        }
    }

    /// Transparent at the tail, opaque over the last pixel of the stroke.
    pub fn gradient(&self, cursor: f64, color: Rgba) -> LinearGradient {
        let opaque_from = ((self.flow_length - 1.0) / self.flow_length).max(0.0);
        LinearGradient::new(
            ScreenPoint::new(cursor, 0.0),
            ScreenPoint::new(cursor + self.flow_length, 0.0),
        )
        .add_color_stop(0.0, with_alpha(color, 0.0))
        .add_color_stop(opaque_from, with_alpha(color, 1.0))
        .add_color_stop(1.0, with_alpha(color, 1.0))
    }

    /// Draws one frame of every enabled connection. The caller clears the
    /// surface first. Returns the number of strokes issued.
    pub fn render<S: Surface>(
        &self,
        surface: &mut S,
        graph: &SegmentGraph,
        connections: &[Connection],
        progress: u32,
    ) -> usize {
        let mut drawn = 0;

        for (index, connection) in connections.iter().enumerate() {
            if !connection.flow.enabled {
                continue;
            }

            let line_space = self.line_space(progress, connection.line.marker_gap);
            let strokes = self.plan_connection(graph, index, line_space);
            let style = StrokeStyle {
                width: connection.flow.width,
                cap: connection.flow.cap,
                join: LineJoin::Miter,
            };

            for group in strokes.chunk_by(|a, b| a.segment == b.segment) {
                let Some(screen) = graph.segment(group[0].segment).and_then(|s| s.screen()) else {
                    tracing::trace!(segment = %group[0].segment, "skipping unprojected segment");
                    continue;
                };

                surface.save();
                surface.translate(screen.start.x, screen.start.y);
                surface.rotate(screen.angle);
                for stroke in group {
                    let path = Path::builder().move_to(stroke.from, 0.0).line_to(stroke.to, 0.0);
                    let paint = Paint::LinearGradient(self.gradient(stroke.cursor, connection.flow.color));
                    surface.stroke_path(&path, &paint, &style);
                    drawn += 1;
                }
                surface.restore();
            }
        }

        tracing::trace!(progress, strokes = drawn, "flow frame rendered");
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DisplayList, DrawOp};
    use crate::models::{Coordinate, FlowStyle};
    use crate::services::ScreenProjector;

    fn connection(points: &[(f64, f64)]) -> Connection {
        Connection::new(points.iter().map(|&(x, y)| Coordinate::new(x, y)).collect())
    }

    fn projected(connections: &[Connection]) -> SegmentGraph {
        let mut graph = SegmentGraph::build(connections).unwrap();
        ScreenProjector::default().project(&mut graph);
        graph
    }

    fn cursors(strokes: &[FlowStroke]) -> Vec<f64> {
        strokes.iter().map(|s| s.cursor).collect()
    }

    mod plan_tests {
        use super::*;

        #[test]
        fn test_strokes_spaced_by_step() {
            let graph = projected(&[connection(&[(0.0, 0.0), (200.0, 0.0)])]);
            let renderer = FlowRenderer::new(20, 60);

            let strokes = renderer.plan_connection(&graph, 0, 0.0);
            assert_eq!(cursors(&strokes), vec![0.0, 80.0, 160.0]);
            let spans: Vec<(f64, f64)> = strokes.iter().map(|s| (s.from, s.to)).collect();
            assert_eq!(spans, vec![(0.0, 20.0), (80.0, 100.0), (160.0, 180.0)]);
        }

        #[test]
        fn test_short_end_segment_is_skipped() {
            let graph = projected(&[connection(&[(0.0, 0.0), (10.0, 0.0), (210.0, 0.0)])]);
            let renderer = FlowRenderer::new(20, 60);

            let strokes = renderer.plan_connection(&graph, 0, 0.0);
            let second = graph.connection_segments(0)[1];
            assert!(strokes.iter().all(|s| s.segment == second));
            // the 10 pixels of the first segment shift the row back
            assert_eq!(cursors(&strokes), vec![-10.0, 70.0, 150.0]);
            assert_eq!((strokes[0].from, strokes[0].to), (0.0, 10.0));
        }

        #[test]
        fn test_segments_before_line_space_are_skipped() {
            let graph = projected(&[connection(&[(0.0, 0.0), (100.0, 0.0), (300.0, 0.0)])]);
            let renderer = FlowRenderer::new(20, 60);

            let strokes = renderer.plan_connection(&graph, 0, 150.0);
            let second = graph.connection_segments(0)[1];
            assert!(strokes.iter().all(|s| s.segment == second));
            assert_eq!(cursors(&strokes), vec![50.0, 130.0]);
        }

        #[test]
        fn test_row_advances_with_progress() {
            let graph = projected(&[connection(&[(0.0, 0.0), (200.0, 0.0)])]);
            let renderer = FlowRenderer::new(20, 60);

            let at = |progress: u32| {
                let space = renderer.line_space(progress, 6.0);
                cursors(&renderer.plan_connection(&graph, 0, space))
            };
            // progress 14 puts the row exactly on the segment start
            assert_eq!(at(14), vec![0.0, 80.0, 160.0]);
            assert_eq!(at(15), vec![1.0, 81.0, 161.0]);
            assert_eq!(at(13), vec![-1.0, 79.0, 159.0]);
        }

        #[test]
        fn test_unknown_connection_plans_nothing() {
            let graph = projected(&[connection(&[(0.0, 0.0), (200.0, 0.0)])]);
            assert!(FlowRenderer::new(20, 60).plan_connection(&graph, 3, 0.0).is_empty());
        }
    }

    mod clip_tests {
        use super::*;

        #[test]
        fn test_entering_stroke() {
            let renderer = FlowRenderer::new(20, 60);
            assert_eq!(renderer.clip(-5.0, 200.0), Some((0.0, 15.0)));
            assert_eq!(renderer.clip(-5.0, 10.0), Some((0.0, 10.0)));
            assert_eq!(renderer.clip(-19.6, 200.0), None);
        }

        #[test]
        fn test_leaving_stroke() {
            let renderer = FlowRenderer::new(20, 60);
            assert_eq!(renderer.clip(190.0, 200.0), Some((190.0, 200.0)));
            assert_eq!(renderer.clip(199.6, 200.0), None);
        }

        #[test]
        fn test_whole_stroke() {
            let renderer = FlowRenderer::new(20, 60);
            assert_eq!(renderer.clip(0.0, 200.0), Some((0.0, 20.0)));
            assert_eq!(renderer.clip(180.0, 200.0), Some((180.0, 200.0)));
        }

        #[test]
        fn test_stroke_fully_behind_start() {
            let renderer = FlowRenderer::new(20, 60);
            assert_eq!(renderer.clip(-20.0, 200.0), None);
            assert_eq!(renderer.clip(-70.0, 200.0), None);
        }
    }

    mod gradient_tests {
        use super::*;
        use nannou::color::rgba;

        #[test]
        fn test_comet_fade_stops() {
            let renderer = FlowRenderer::new(20, 60);
            let gradient = renderer.gradient(40.0, rgba(1.0, 1.0, 1.0, 1.0));

            assert_eq!(gradient.start, ScreenPoint::new(40.0, 0.0));
            assert_eq!(gradient.end, ScreenPoint::new(60.0, 0.0));
            let offsets: Vec<f64> = gradient.stops.iter().map(|s| s.offset).collect();
            assert_eq!(offsets, vec![0.0, 0.95, 1.0]);
            let alphas: Vec<f32> = gradient.stops.iter().map(|s| s.color.alpha).collect();
            assert_eq!(alphas, vec![0.0, 1.0, 1.0]);
        }

        #[test]
        fn test_one_pixel_flow_is_opaque_immediately() {
            let gradient = FlowRenderer::new(1, 60).gradient(0.0, rgba(1.0, 0.0, 0.0, 1.0));
            assert_eq!(gradient.stops[1].offset, 0.0);
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_issues_strokes_in_segment_frame() {
            let connections = [connection(&[(10.0, 10.0), (210.0, 10.0)])];
            let graph = projected(&connections);
            let renderer = FlowRenderer::new(20, 60);
            let mut surface = DisplayList::new(400.0, 400.0);

            // progress 14 + marker gap 6 - flow length 20 = 0
            assert_eq!(renderer.render(&mut surface, &graph, &connections, 14), 3);
            assert_eq!(surface.save_depth(), 0);

            for op in surface.ops() {
                let DrawOp::Stroke { transform, paint, style, .. } = op else {
                    panic!("unexpected op {:?}", op);
                };
                assert_eq!(transform.translation, ScreenPoint::new(10.0, 10.0));
                assert_eq!(transform.rotation, 0.0);
                assert_eq!(style.width, 3.0);
                assert!(matches!(paint, Paint::LinearGradient(_)));
            }
        }

        #[test]
        fn test_disabled_flow_draws_nothing() {
            let flow = FlowStyle {
                enabled: false,
                ..FlowStyle::default()
            };
            let connections = [connection(&[(0.0, 0.0), (200.0, 0.0)]).with_flow_style(flow)];
            let graph = projected(&connections);
            let mut surface = DisplayList::new(400.0, 400.0);

            assert_eq!(FlowRenderer::new(20, 60).render(&mut surface, &graph, &connections, 14), 0);
            assert!(surface.is_empty());
        }

        #[test]
        fn test_unprojected_graph_draws_nothing() {
            let connections = [connection(&[(0.0, 0.0), (200.0, 0.0)])];
            let graph = SegmentGraph::build(&connections).unwrap();
            let mut surface = DisplayList::new(400.0, 400.0);

            assert_eq!(FlowRenderer::new(20, 60).render(&mut surface, &graph, &connections, 14), 0);
            assert_eq!(surface.save_depth(), 0);
        }
    }
}
