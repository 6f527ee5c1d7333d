pub mod animation;
pub mod canvas;
pub mod error;
pub mod layout;
pub mod macros;
pub mod path;
pub mod render;
pub mod ring;
pub mod style;
pub mod view;

pub use animation::{AnimationDriver, OnComplete, TickHandle, TickOutcome};
pub use canvas::{Canvas, TextAlign, TextStyle};
pub use error::RingError;
pub use layout::{Dimension, Geometry, LayoutConfig, MeasureSpec, SizeMode};
pub use path::{Arc, Contour, Path, Point};
pub use ring::{Explanation, RingSet};
pub use style::{HexColor, Paint, PaintRole, PaintStyle, RingStyle, StyleRegistry};
pub use view::RingProgress;
