// src/views/mod.rs

pub mod line_flow;

pub use line_flow::{LineFlow, LineFlowConfig};
