// src/error.rs
//
// Construction and configuration errors. Frame rendering itself never fails.

use crate::services::SegmentId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("connection {connection} has {points} point(s), a path needs at least 2")]
    PathTooShort { connection: usize, points: usize },

    #[error("segment {segment} of connection {connection} has zero length at ({x}, {y})")]
    ZeroLengthSegment {
        connection: usize,
        segment: usize,
        x: f64,
        y: f64,
    },

    #[error("frame rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),

    #[error("flow length ({flow_length}) and step size ({step_size}) must both be at least 1 and sum to at most u32::MAX")]
    InvalidFlowGeometry { flow_length: u32, step_size: u32 },

    #[error("unrecognised color '{0}'")]
    InvalidColor(String),

    #[error("segment {0} does not exist")]
    UnknownSegment(SegmentId),

    #[error("segment {0} has not been projected to screen space yet")]
    UnprojectedSegment(SegmentId),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse scene: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
