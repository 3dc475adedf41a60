// src/services/segment_graph.rs
//
// SegmentGraph splits every connection into straight segments and holds the
// relationships between segment endpoints across connections.
// Segments live in an arena; adjacency is stored as sets of arena indices.

use crate::error::{FlowError, Result};
use crate::models::{Connection, Coordinate, ScreenPoint};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen-space data for a segment, filled in once by the `ScreenProjector`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSegment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    /// Travel direction in radians, 0..2pi.
    pub angle: f64,
    /// Length used by the flow renderer. Starts out as the geometric length.
    pub display_length: f64,
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub id: SegmentId,
    /// Index of the owning connection.
    pub connection: usize,
    /// Position of this segment within its connection's path.
    pub index: usize,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Geometric length in logical units.
    pub length: f64,
    successors: BTreeSet<SegmentId>,
    predecessors: BTreeSet<SegmentId>,
    screen: Option<ScreenSegment>,
}

impl Segment {
    /// Segments on other connections that start where this one ends.
    pub fn successors(&self) -> &BTreeSet<SegmentId> {
        &self.successors
    }

    /// Segments on other connections that end where this one starts.
    pub fn predecessors(&self) -> &BTreeSet<SegmentId> {
        &self.predecessors
    }

    pub fn screen(&self) -> Option<&ScreenSegment> {
        self.screen.as_ref()
    }

    pub fn is_projected(&self) -> bool {
        self.screen.is_some()
    }

    pub fn display_length(&self) -> f64 {
        self.screen
            .map(|screen| screen.display_length)
            .unwrap_or(self.length)
    }
}

#[derive(Debug, Default)]
pub struct SegmentGraph {
    segments: Vec<Segment>,
    // segment ids per connection, in path order
    chains: Vec<Vec<SegmentId>>,
    // total geometric length per connection
    lengths: Vec<f64>,
}

impl SegmentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(connections: &[Connection]) -> Result<Self> {
        let mut graph = Self::new();
        graph.extend(connections)?;
        Ok(graph)
    }

    /// Adds connections after the existing ones and links their segments
    /// against every segment already in the graph. Returns the indices given
    /// to the new connections. On error the graph is left untouched.
    pub fn extend(&mut self, connections: &[Connection]) -> Result<Range<usize>> {
        let first_connection = self.chains.len();
        let first_segment = self.segments.len();

        // Split everything first so a bad path doesn't leave half a graph
        let mut new_segments = Vec::new();
        let mut new_chains = Vec::with_capacity(connections.len());
        let mut new_lengths: Vec<f64> = Vec::with_capacity(connections.len());

        for (offset, connection) in connections.iter().enumerate() {
            let connection_index = first_connection + offset;
            let next_id = first_segment + new_segments.len();
            let segments = split_path(connection_index, &connection.points, next_id)?;

            new_chains.push(segments.iter().map(|segment| segment.id).collect());
            new_lengths.push(segments.iter().map(|segment| segment.length).sum());
            new_segments.extend(segments);
        }

        self.segments.extend(new_segments);
        self.chains.extend(new_chains);
        self.lengths.extend(new_lengths);

        let links = self.build_connections(first_segment);

        tracing::debug!(
            connections = connections.len(),
            segments = self.segments.len() - first_segment,
            links,
            "segment graph extended"
        );

        Ok(first_connection..self.chains.len())
    }

    // Links every (A, B) pair on different connections where A ends exactly
    // where B starts. Pairs between two pre-existing segments are already done.
    fn build_connections(&mut self, first_new: usize) -> usize {
        let mut new_links = Vec::new();

        for a in &self.segments {
            for b in &self.segments {
                if a.id == b.id || a.connection == b.connection {
                    continue;
                }
                if a.id.0 < first_new && b.id.0 < first_new {
                    continue;
                }
                if a.end == b.start {
                    new_links.push((a.id, b.id));
                }
            }
        }

        for (from, to) in &new_links {
            self.segments[from.0].successors.insert(*to);
            self.segments[to.0].predecessors.insert(*from);
        }

        new_links.len()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn connection_count(&self) -> usize {
        self.chains.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.0)
    }

    /// Segment ids of one connection, in path order.
    pub fn connection_segments(&self, connection: usize) -> &[SegmentId] {
        self.chains
            .get(connection)
            .map(|chain| chain.as_slice())
            .unwrap_or(&[])
    }

    /// Total geometric length of one connection.
    pub fn connection_length(&self, connection: usize) -> f64 {
        self.lengths.get(connection).copied().unwrap_or(0.0)
    }

    pub fn successors(&self, id: SegmentId) -> Vec<SegmentId> {
        self.segment(id)
            .map(|segment| segment.successors.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, id: SegmentId) -> Vec<SegmentId> {
        self.segment(id)
            .map(|segment| segment.predecessors.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn set_screen(&mut self, id: SegmentId, screen: ScreenSegment) {
        if let Some(segment) = self.segments.get_mut(id.0) {
            segment.screen = Some(screen);
        }
    }

    /// Overrides the length the flow renderer walks, independent of geometry.
    pub fn set_display_length(&mut self, id: SegmentId, length: f64) -> Result<()> {
        let segment = self
            .segments
            .get_mut(id.0)
            .ok_or(FlowError::UnknownSegment(id))?;
        let screen = segment
            .screen
            .as_mut()
            .ok_or(FlowError::UnprojectedSegment(id))?;
        screen.display_length = length;
        Ok(())
    }

}

fn split_path(connection: usize, points: &[Coordinate], first_id: usize) -> Result<Vec<Segment>> {
    if points.len() < 2 {
        return Err(FlowError::PathTooShort {
            connection,
            points: points.len(),
        });
    }

    points
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (start, end) = (pair[0], pair[1]);
            if start == end {
                return Err(FlowError::ZeroLengthSegment {
                    connection,
                    segment: index,
                    x: start.x,
                    y: start.y,
                });
            }
            Ok(Segment {
                id: SegmentId(first_id + index),
                connection,
                index,
                start,
                end,
                length: start.distance(end),
                successors: BTreeSet::new(),
                predecessors: BTreeSet::new(),
                screen: None,
            })
        })
        .collect()
}
