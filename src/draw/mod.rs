// src/draw/mod.rs
// Drawing surfaces: the Surface trait the renderers draw through, the
// retained DisplayList implementation, and the nannou painter that replays it.

pub mod display_list;
pub mod nannou_paint;
pub mod surface;

pub use display_list::{text_width, DisplayList, DrawOp, GLYPH_ADVANCE};
pub use nannou_paint::{NannouPainter, TextureCache};
pub use surface::{ColorStop, LinearGradient, Paint, Path, PathOp, StrokeStyle, Surface};
