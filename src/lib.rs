// src/lib.rs
//
// flowvis: markers joined by polylines with an animated, fading flow
// travelling along each connection.

pub mod animation;
pub mod config;
pub mod controllers;
pub mod draw;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod utilities;
pub mod views;

pub use error::{FlowError, Result};
