use cairo::{Antialias, Context, FillRule, FontSlant, FontWeight};
use ringprogress::{Canvas, Paint, PaintStyle, Path, TextAlign, TextStyle};

/// Draws ring paths and labels onto a cairo context.
pub struct CairoCanvas<'a> {
    cr: &'a Context,
    width: f64,
    height: f64,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context, width: f64, height: f64) -> Self {
        Self { cr, width, height }
    }

    fn trace(&self, path: &Path) {
        self.cr.new_path();
        for contour in &path.contours {
            self.cr.new_sub_path();
            for arc in &contour.arcs {
                let (c, r) = (arc.center, arc.radius);
                if arc.sweep >= 0.0 {
                    self.cr.arc(c.x, c.y, r, arc.start, arc.end());
                } else {
                    self.cr.arc_negative(c.x, c.y, r, arc.start, arc.end());
                }
            }
            self.cr.close_path();
        }
    }

    fn set_color(&self, color: palette::Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn draw_path(&mut self, path: &Path, paint: &Paint) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.trace(path);
        self.set_color(paint.color);
        self.cr.set_antialias(if paint.anti_alias {
            Antialias::Default
        } else {
            Antialias::None
        });

        let result = match paint.style {
            PaintStyle::Stroke => {
                self.cr.set_line_width(paint.stroke_width);
                self.cr.stroke()
            }
            PaintStyle::Fill => {
                // nested contours fill as a donut rather than a disk
                self.cr.set_fill_rule(if path.contours.len() > 1 {
                    FillRule::EvenOdd
                } else {
                    FillRule::Winding
                });
                self.cr.fill()
            }
        };
        self.cr.restore()?;
        result
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> Result<(), cairo::Error> {
        if text.is_empty() {
            return Ok(());
        }
        self.cr.save()?;
        self.set_color(style.color);
        self.cr
            .select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
        self.cr.set_font_size(style.size);

        let x = match style.align {
            TextAlign::Left => x,
            TextAlign::Right => x - self.cr.text_extents(text)?.x_advance(),
        };
        self.cr.move_to(x, y);
        self.cr.show_text(text)?;
        self.cr.restore()
    }

    fn measure_bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
