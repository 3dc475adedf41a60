// src/render/line_renderer.rs
//
// Static connection bodies and their rounded arrowheads.

use crate::draw::{Paint, Path, StrokeStyle, Surface};
use crate::models::{ArrowDirection, Connection, LineStyle, ScreenPoint};
use crate::services::ScreenProjector;

pub struct LineRenderer {
    projector: ScreenProjector,
}

impl LineRenderer {
    pub fn new(projector: ScreenProjector) -> Self {
        Self { projector }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, connection: &Connection) {
        let points: Vec<ScreenPoint> = connection
            .points
            .iter()
            .map(|p| self.projector.to_pixel(*p))
            .collect();
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let body = rest
            .iter()
            .fold(Path::builder().move_to(first.x, first.y), |path, p| {
                path.line_to(p.x, p.y)
            });
        let style = StrokeStyle {
            width: connection.line.width,
            cap: connection.line.cap,
            join: connection.line.join,
        };

        surface.save();
        surface.stroke_path(&body, &Paint::Solid(connection.line.color), &style);
        if let Some(tip) = points.last() {
            if let Some(arrow) = arrow_path(connection.arrow_direction, *tip, &connection.line) {
                surface.fill_path(&arrow, connection.line.color);
            }
        }
        surface.restore();
    }

    pub fn draw_all<S: Surface>(&self, surface: &mut S, connections: &[Connection]) {
        for connection in connections {
            self.draw(surface, connection);
        }
    }
}

/// Rounded triangle pointing in `direction`, its tip half a marker gap past
/// `last`. None for connections without an arrowhead.
pub fn arrow_path(direction: ArrowDirection, last: ScreenPoint, style: &LineStyle) -> Option<Path> {
    let half_gap = style.marker_gap / 2.0;

    let origin = match direction {
        ArrowDirection::Left => ScreenPoint::new(last.x - half_gap, last.y),
        ArrowDirection::Right => ScreenPoint::new(last.x + half_gap, last.y),
        ArrowDirection::Up => ScreenPoint::new(last.x, last.y - half_gap),
        ArrowDirection::Down => ScreenPoint::new(last.x, last.y + half_gap),
        ArrowDirection::None => return None,
    };
    // (u, v): u runs from the tip back along the line, v across it
    let at = |u: f64, v: f64| {
        let (dx, dy) = match direction {
            ArrowDirection::Left => (u, v),
            ArrowDirection::Right => (-u, v),
            ArrowDirection::Up => (v, u),
            ArrowDirection::Down | ArrowDirection::None => (v, -u),
        };
        (origin.x + dx, origin.y + dy)
    };

    let s = style.arrow_size;
    let r = style.arrow_round_size;

    let (x0, y0) = at(r - 1.0, r - 1.0);
    let (x1, y1) = at(s - r, s - r);
    let (c1x, c1y) = at(s, s);
    let (x2, y2) = at(s, s - r);
    let (x3, y3) = at(s, -s + r);
    let (c2x, c2y) = at(s, -s);
    let (x4, y4) = at(s - r, -s + r);
    let (x5, y5) = at(r - 1.0, -r + 1.0);
    let (c3x, c3y) = at(0.0, 0.0);

    Some(
        Path::builder()
            .move_to(x0, y0)
            .line_to(x1, y1)
            .quad_to(c1x, c1y, x2, y2)
            .line_to(x3, y3)
            .quad_to(c2x, c2y, x4, y4)
            .line_to(x5, y5)
            .quad_to(c3x, c3y, x0, y0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DisplayList, DrawOp, PathOp};
    use crate::models::Coordinate;

    fn op_points(path: &Path) -> Vec<ScreenPoint> {
        path.ops()
            .iter()
            .flat_map(|op| match *op {
                PathOp::MoveTo(p) | PathOp::LineTo(p) => vec![p],
                PathOp::QuadTo { ctrl, to } => vec![ctrl, to],
                PathOp::Close => vec![],
            })
            .collect()
    }

    mod arrow_tests {
        use super::*;

        #[test]
        fn test_left_arrow_geometry() {
            let path = arrow_path(ArrowDirection::Left, ScreenPoint::new(100.0, 50.0), &LineStyle::default()).unwrap();
            let points = op_points(&path);

            // origin sits half the marker gap before the last point
            assert_eq!(points[0], ScreenPoint::new(99.0, 52.0));
            assert_eq!(points[1], ScreenPoint::new(102.0, 55.0));
            assert_eq!(points[2], ScreenPoint::new(105.0, 58.0));
            // the final curve bends around the tip
            assert_eq!(points[points.len() - 2], ScreenPoint::new(97.0, 50.0));
            assert_eq!(points[points.len() - 1], points[0]);
        }

        #[test]
        fn test_right_mirrors_left() {
            let last = ScreenPoint::new(100.0, 50.0);
            let style = LineStyle::default();
            let left = op_points(&arrow_path(ArrowDirection::Left, last, &style).unwrap());
            let right = op_points(&arrow_path(ArrowDirection::Right, last, &style).unwrap());

            for (l, r) in left.iter().zip(&right) {
                assert_eq!(r.x, 2.0 * last.x - l.x);
                assert_eq!(r.y, l.y);
            }
        }

        #[test]
        fn test_down_mirrors_up() {
            let last = ScreenPoint::new(40.0, 80.0);
            let style = LineStyle::default();
            let up = op_points(&arrow_path(ArrowDirection::Up, last, &style).unwrap());
            let down = op_points(&arrow_path(ArrowDirection::Down, last, &style).unwrap());

            assert_eq!(up[0], ScreenPoint::new(42.0, 79.0));
            for (u, d) in up.iter().zip(&down) {
                assert_eq!(d.x, u.x);
                assert_eq!(d.y, 2.0 * last.y - u.y);
            }
        }

        #[test]
        fn test_no_arrow() {
            assert!(arrow_path(ArrowDirection::None, ScreenPoint::default(), &LineStyle::default()).is_none());
        }
    }

    mod body_tests {
        use super::*;

        #[test]
        fn test_body_and_arrow_are_drawn() {
            let connection = Connection::new(vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(50.0, 0.0),
                Coordinate::new(50.0, 50.0),
            ])
            .with_arrow(ArrowDirection::Down);
            let mut surface = DisplayList::new(100.0, 100.0);

            LineRenderer::new(ScreenProjector::default()).draw(&mut surface, &connection);

            assert_eq!(surface.len(), 2);
            let DrawOp::Stroke { path, paint, style, .. } = &surface.ops()[0] else {
                panic!("expected the body first");
            };
            assert_eq!(path.ops().len(), 3);
            assert_eq!(*paint, Paint::Solid(connection.line.color));
            assert_eq!(style.width, 3.0);
            assert!(matches!(surface.ops()[1], DrawOp::Fill { .. }));
            assert_eq!(surface.save_depth(), 0);
        }

        #[test]
        fn test_body_is_offset_by_reference() {
            let connection = Connection::new(vec![Coordinate::new(110.0, 20.0), Coordinate::new(150.0, 20.0)]);
            let projector = ScreenProjector::new(Coordinate::new(100.0, 0.0), Default::default());
            let mut surface = DisplayList::new(100.0, 100.0);

            LineRenderer::new(projector).draw(&mut surface, &connection);

            let DrawOp::Stroke { path, .. } = &surface.ops()[0] else {
                panic!("expected a stroke");
            };
            assert_eq!(path.ops()[0], PathOp::MoveTo(ScreenPoint::new(10.0, 20.0)));
            assert_eq!(surface.len(), 1);
        }
    }
}
