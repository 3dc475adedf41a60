pub mod connection;
pub mod geometry;
pub mod marker;
pub mod style;

pub use connection::Connection;
pub use geometry::{Coordinate, Origin, Rect, ScreenPoint, Transform2D};
pub use marker::{Label, LabelPosition, Marker};
pub use style::{ArrowDirection, FlowStyle, LineCap, LineJoin, LineStyle, TextStyle};
