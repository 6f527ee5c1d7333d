use crate::canvas::{Canvas, TextAlign, TextStyle};
use crate::layout::{Geometry, LayoutConfig, LegendSlot};
use crate::path::{Arc, Contour, Path};
use crate::ring::{Explanation, RingSet};
use crate::style::{PaintRole, RingStyle};
use std::iter::zip;

/// Legend label size before density scaling.
pub const LEGEND_TEXT_SIZE: f64 = 12.0;

/// Outline first, then interior.
const SWEEP_ROLES: [PaintRole; 2] = [PaintRole::Stroke, PaintRole::Fill];

struct RingRenderer<'a> {
    index: usize,
    style: &'a RingStyle,
    geometry: &'a Geometry,
    radius: f64,
    progress: f64,
}

impl<'a> RingRenderer<'a> {
    fn new(
        index: usize,
        style: &'a RingStyle,
        geometry: &'a Geometry,
        radius: f64,
        progress: f64,
    ) -> Self {
        Self {
            index,
            style,
            geometry,
            radius,
            progress,
        }
    }

    fn draw_background<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let path = Path::ring_outline(self.geometry.center, self.radius, self.geometry.thickness);
        canvas.draw_path(&path, self.style.paint(PaintRole::Ring))
    }

    fn draw_progress<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let path = Path::progress_outline(
            self.geometry.center,
            self.radius,
            self.geometry.thickness,
            self.progress,
        );
        for role in SWEEP_ROLES {
            canvas.draw_path(&path, self.style.paint(role))?;
        }
        Ok(())
    }

    fn draw_hint<C: Canvas>(&self, canvas: &mut C, scale_factor: f64) -> Result<(), C::Error> {
        let Some(anchor) = self.geometry.hint_anchor(self.index) else {
            return Ok(());
        };
        let style = TextStyle {
            color: self.style.paint(PaintRole::Hint).color,
            size: self.geometry.hint_text_size(scale_factor),
            align: TextAlign::Left,
        };
        canvas.draw_text(&hint_text(self.progress), anchor.x, anchor.y, &style)
    }
}

/// Percentage with one decimal, e.g. `"42.5%"`.
pub fn hint_text(progress: f64) -> String {
    format!("{:.1}%", progress * 100.0)
}

/// Paints one frame: background rings, progress sweeps, optional hints and
/// optional legend. Rings are drawn outermost first.
pub fn draw<C: Canvas>(
    canvas: &mut C,
    rings: &RingSet,
    layout: &LayoutConfig,
    geometry: &Geometry,
    scale_factor: f64,
) -> Result<(), C::Error> {
    let renderers: Vec<RingRenderer> = zip(
        zip(rings.styles().active(), &geometry.radii),
        rings.progress(),
    )
    .enumerate()
    .map(|(i, ((style, &radius), &progress))| {
        RingRenderer::new(i, style, geometry, radius, progress)
    })
    .collect();

    for ring in &renderers {
        ring.draw_background(canvas)?;
    }
    for ring in &renderers {
        ring.draw_progress(canvas)?;
    }
    if layout.show_progress_hint {
        for ring in &renderers {
            ring.draw_hint(canvas, scale_factor)?;
        }
    }
    if layout.show_legend {
        draw_legend(canvas, rings, geometry, scale_factor)?;
    }
    Ok(())
}

fn draw_legend<C: Canvas>(
    canvas: &mut C,
    rings: &RingSet,
    geometry: &Geometry,
    scale_factor: f64,
) -> Result<(), C::Error> {
    let entries = zip(
        zip(&geometry.legend, rings.styles().active()),
        rings.explanations(),
    );
    for ((slot, style), explanation) in entries {
        draw_legend_entry(
            canvas,
            slot,
            style,
            explanation,
            geometry.swatch_radius,
            scale_factor,
        )?;
    }
    Ok(())
}

fn draw_legend_entry<C: Canvas>(
    canvas: &mut C,
    slot: &LegendSlot,
    style: &RingStyle,
    explanation: &Explanation,
    swatch_radius: f64,
    scale_factor: f64,
) -> Result<(), C::Error> {
    let swatch = Path::new(vec![Contour::new(vec![Arc::circle(
        slot.swatch,
        swatch_radius,
    )])]);
    for role in SWEEP_ROLES {
        canvas.draw_path(&swatch, style.paint(role))?;
    }

    let text_style = TextStyle {
        color: style.hint.color,
        size: LEGEND_TEXT_SIZE * scale_factor,
        align: slot.align,
    };
    canvas.draw_text(
        explanation.as_str(),
        slot.text_anchor.x,
        slot.text_anchor.y,
        &text_style,
    )
}
