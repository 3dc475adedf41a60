pub mod color;

pub use color::{from_rgb_triple, parse_color, with_alpha};
