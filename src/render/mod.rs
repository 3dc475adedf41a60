// src/render/mod.rs
// Static and animated rendering onto a Surface

pub mod flow_renderer;
pub mod line_renderer;
pub mod marker_renderer;

pub use flow_renderer::{FlowRenderer, FlowStroke};
pub use line_renderer::{arrow_path, LineRenderer};
pub use marker_renderer::{label_origin, MarkerRenderer};

use crate::draw::Surface;
use crate::models::{Connection, Marker};
use crate::services::ScreenProjector;

/// Draws everything that does not move: markers with their labels, then the
/// connection bodies and arrowheads on top.
pub fn draw_static<S: Surface>(
    surface: &mut S,
    markers: &[Marker],
    connections: &[Connection],
    projector: ScreenProjector,
) {
    MarkerRenderer::new(projector).draw_all(surface, markers);
    LineRenderer::new(projector).draw_all(surface, connections);
    tracing::debug!(
        markers = markers.len(),
        connections = connections.len(),
        "static layer drawn"
    );
}
