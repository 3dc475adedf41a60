pub mod projector;
pub mod segment_graph;

pub use projector::ScreenProjector;
pub use segment_graph::{ScreenSegment, Segment, SegmentGraph, SegmentId};
