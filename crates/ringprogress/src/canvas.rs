use crate::path::Path;
use crate::style::Paint;
use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// Text paint built fresh for each draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Srgba<f64>,
    pub size: f64,
    pub align: TextAlign,
}

/// Drawing surface supplied by the host toolkit.
pub trait Canvas {
    type Error;

    /// Strokes or fills `path` according to `paint.style`.
    fn draw_path(&mut self, path: &Path, paint: &Paint) -> Result<(), Self::Error>;

    /// Draws `text` with its baseline at `y`. `x` is the left or right edge of
    /// the text depending on `style.align`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle)
    -> Result<(), Self::Error>;

    /// Width and height of the area available for drawing.
    fn measure_bounds(&self) -> (f64, f64);
}
