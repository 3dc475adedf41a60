// src/views/line_flow.rs
//
// LineFlow ties the pieces together: it owns the scene, the segment graph,
// two drawing surfaces (static content below, animated flow above) and the
// frame loop.

use crate::animation::{AnimationScheduler, FrameScheduler};
use crate::config::{AnimationConfig, Scene};
use crate::draw::Surface;
use crate::error::Result;
use crate::models::{Connection, Coordinate, Marker, Origin};
use crate::render::{draw_static, FlowRenderer};
use crate::services::{ScreenProjector, SegmentGraph};
use std::ops::Range;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LineFlowConfig {
    pub markers: Vec<Marker>,
    pub connections: Vec<Connection>,
    pub fps: f64,
    /// Gap between consecutive flow strokes.
    pub step_size: u32,
    /// Length of one flow stroke.
    pub flow_length: u32,
    pub origin: Origin,
    /// Logical coordinate of the surfaces' top-left pixel.
    pub reference: Coordinate,
}

impl Default for LineFlowConfig {
    fn default() -> Self {
        Self::from_scene(Scene::default(), &AnimationConfig::default())
    }
}

impl LineFlowConfig {
    pub fn from_scene(scene: Scene, animation: &AnimationConfig) -> Self {
        Self {
            markers: scene.markers,
            connections: scene.connections,
            fps: animation.fps,
            step_size: animation.step_size,
            flow_length: animation.flow_length,
            origin: animation.origin,
            reference: animation.reference,
        }
    }
}

pub struct LineFlow<S: Surface, F: FrameScheduler> {
    markers: Vec<Marker>,
    connections: Vec<Connection>,
    graph: SegmentGraph,
    projector: ScreenProjector,
    flow: FlowRenderer,
    scheduler: AnimationScheduler,
    static_surface: S,
    flow_surface: S,
    frames: F,
}

impl<S: Surface, F: FrameScheduler> LineFlow<S, F> {
    /// Builds and projects the segment graph. Nothing is drawn and the
    /// animation is not started until `render`.
    pub fn new(config: LineFlowConfig, static_surface: S, flow_surface: S, frames: F) -> Result<Self> {
        let scheduler = AnimationScheduler::new(config.fps, config.step_size, config.flow_length)?;
        let projector = ScreenProjector::new(config.reference, config.origin);

        let mut graph = SegmentGraph::build(&config.connections)?;
        projector.project(&mut graph);

        tracing::info!(
            markers = config.markers.len(),
            connections = config.connections.len(),
            segments = graph.len(),
            fps = config.fps,
            "line flow initialized"
        );

        Ok(Self {
            markers: config.markers,
            connections: config.connections,
            graph,
            projector,
            flow: FlowRenderer::new(config.flow_length, config.step_size),
            scheduler,
            static_surface,
            flow_surface,
            frames,
        })
    }

    /// Draws the static layer and starts the flow animation.
    pub fn render(&mut self) {
        self.redraw_static();
        self.flow_surface.clear();
        self.scheduler.start(&mut self.frames);
    }

    /// Stops the animation and clears both layers.
    pub fn stop(&mut self) {
        self.scheduler.stop(&mut self.frames);
        self.static_surface.clear();
        self.flow_surface.clear();
    }

    /// Called by the host when a requested frame fires. Returns true when a
    /// new flow frame was drawn.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        if !self.scheduler.tick(now, &mut self.frames) {
            return false;
        }
        self.flow_surface.clear();
        self.flow.render(
            &mut self.flow_surface,
            &self.graph,
            &self.connections,
            self.scheduler.progress(),
        );
        true
    }

    /// Adds connections to a live diagram. Only the new segments are linked
    /// and projected. Returns the indices given to the new connections.
    pub fn add_connections(&mut self, connections: Vec<Connection>) -> Result<Range<usize>> {
        let added = self.graph.extend(&connections)?;
        self.projector.project(&mut self.graph);
        self.connections.extend(connections);

        if self.scheduler.is_running() {
            self.redraw_static();
        }
        tracing::debug!(added = added.len(), total = self.connections.len(), "connections added");
        Ok(added)
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        self.scheduler.set_fps(fps)
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Minimum time between two flow frames.
    pub fn frame_interval(&self) -> Duration {
        self.scheduler.interval()
    }

    pub fn progress(&self) -> u32 {
        self.scheduler.progress()
    }

    pub fn graph(&self) -> &SegmentGraph {
        &self.graph
    }

    /// Direct access for display length overrides.
    pub fn graph_mut(&mut self) -> &mut SegmentGraph {
        &mut self.graph
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn static_surface(&self) -> &S {
        &self.static_surface
    }

    pub fn flow_surface(&self) -> &S {
        &self.flow_surface
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    fn redraw_static(&mut self) {
        self.static_surface.clear();
        draw_static(
            &mut self.static_surface,
            &self.markers,
            &self.connections,
            self.projector,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameQueue;
    use crate::draw::{DisplayList, DrawOp};
    use crate::error::FlowError;
    use crate::models::{ArrowDirection, Label, Rect};

    fn connection(points: &[(f64, f64)]) -> Connection {
        Connection::new(points.iter().map(|&(x, y)| Coordinate::new(x, y)).collect())
    }

    fn config() -> LineFlowConfig {
        LineFlowConfig {
            markers: vec![
                Marker::new("a.png", Rect::new(0.0, 0.0, 20.0, 20.0)).with_label(Label::new("a")),
                Marker::new("b.png", Rect::new(300.0, 0.0, 20.0, 20.0)),
            ],
            connections: vec![
                connection(&[(26.0, 10.0), (294.0, 10.0)]).with_arrow(ArrowDirection::Right),
                connection(&[(294.0, 10.0), (294.0, 200.0)]),
            ],
            ..LineFlowConfig::default()
        }
    }

    fn create_line_flow() -> LineFlow<DisplayList, FrameQueue> {
        LineFlow::new(
            config(),
            DisplayList::new(400.0, 300.0),
            DisplayList::new(400.0, 300.0),
            FrameQueue::new(),
        )
        .unwrap()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_new_builds_graph_without_drawing() {
        let flow = create_line_flow();
        assert_eq!(flow.graph().len(), 2);
        assert!(flow.graph().segments().iter().all(|s| s.is_projected()));
        assert!(flow.static_surface().is_empty());
        assert!(flow.flow_surface().is_empty());
        assert!(flow.frames().is_idle());
        assert!(!flow.is_running());
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let bad_fps = LineFlowConfig {
            fps: 0.0,
            ..config()
        };
        let result = LineFlow::new(bad_fps, DisplayList::new(1.0, 1.0), DisplayList::new(1.0, 1.0), FrameQueue::new());
        assert!(matches!(result, Err(FlowError::InvalidFrameRate(_))));

        let mut short = config();
        short.connections.push(connection(&[(5.0, 5.0)]));
        let result = LineFlow::new(short, DisplayList::new(1.0, 1.0), DisplayList::new(1.0, 1.0), FrameQueue::new());
        assert!(matches!(result, Err(FlowError::PathTooShort { connection: 2, .. })));
    }

    #[test]
    fn test_render_draws_static_and_starts() {
        let mut flow = create_line_flow();
        flow.render();

        // two images, one label, two bodies, one arrowhead
        assert_eq!(flow.static_surface().len(), 6);
        assert!(flow.is_running());
        assert_eq!(flow.frames().pending(), 1);
        assert!(flow.flow_surface().is_empty());
    }

    #[test]
    fn test_frames_draw_flow_strokes() {
        let mut flow = create_line_flow();
        flow.render();

        assert!(flow.frames_mut().take_due().is_some());
        assert!(flow.on_frame(ms(0)));
        assert_eq!(flow.progress(), 1);
        assert!(!flow.flow_surface().is_empty());
        assert!(flow
            .flow_surface()
            .ops()
            .iter()
            .all(|op| matches!(op, DrawOp::Stroke { .. })));

        // throttled: 24 fps leaves ~41ms between frames
        assert!(!flow.on_frame(ms(10)));
        assert!(flow.on_frame(ms(50)));
        assert_eq!(flow.progress(), 2);
    }

    #[test]
    fn test_stop_clears_everything() {
        let mut flow = create_line_flow();
        flow.render();
        flow.on_frame(ms(0));
        flow.stop();

        assert!(flow.static_surface().is_empty());
        assert!(flow.flow_surface().is_empty());
        assert!(flow.frames().is_idle());

        assert!(!flow.on_frame(ms(1000)));
        assert!(flow.flow_surface().is_empty());
        assert!(flow.frames().is_idle());
    }

    #[test]
    fn test_add_connections_links_and_redraws() {
        let mut flow = create_line_flow();
        flow.render();
        let before = flow.static_surface().len();

        let added = flow
            .add_connections(vec![connection(&[(294.0, 200.0), (26.0, 200.0)])])
            .unwrap();
        assert_eq!(added, 2..3);
        assert_eq!(flow.connections().len(), 3);
        assert!(flow.graph().segments().iter().all(|s| s.is_projected()));

        // the new segment continues where the second connection ends
        let last_of_second = flow.graph().connection_segments(1)[0];
        let new = flow.graph().connection_segments(2)[0];
        assert_eq!(flow.graph().successors(last_of_second), vec![new]);
        assert_eq!(flow.static_surface().len(), before + 1);
    }

    #[test]
    fn test_failed_add_keeps_state() {
        let mut flow = create_line_flow();
        assert!(flow.add_connections(vec![connection(&[(1.0, 1.0), (1.0, 1.0)])]).is_err());
        assert_eq!(flow.connections().len(), 2);
        assert_eq!(flow.graph().connection_count(), 2);
    }

    #[test]
    fn test_set_fps() {
        let mut flow = create_line_flow();
        assert!(flow.set_fps(60.0).is_ok());
        assert!(flow.set_fps(0.0).is_err());
    }
}
