use crate::canvas::TextAlign;
use crate::path::Point;

/// Ring thickness and spacing share this ratio when derived from the box size.
const THICKNESS_SHARE: f64 = 14.0 / 17.0;
const SPACING_SHARE: f64 = 3.0 / 17.0;

/// A dimension that is either derived from the available box or pinned by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Pinned(f64),
}

impl Dimension {
    pub fn resolve(self, derived: f64) -> f64 {
        match self {
            Self::Auto => derived,
            Self::Pinned(value) => value,
        }
    }
}

impl From<Option<f64>> for Dimension {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Auto, Self::Pinned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub thickness: Dimension,
    pub spacing: Dimension,
    pub show_progress_hint: bool,
    pub show_legend: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            thickness: Dimension::Auto,
            spacing: Dimension::Auto,
            show_progress_hint: false,
            show_legend: true,
        }
    }
}

/// How the host constrains the height it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    #[default]
    Exactly,
    AtMost,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    pub width: f64,
    pub height: f64,
    pub height_mode: SizeMode,
}

impl MeasureSpec {
    pub fn exactly(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            height_mode: SizeMode::Exactly,
        }
    }

    pub fn at_most(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            height_mode: SizeMode::AtMost,
        }
    }
}

/// Where one legend entry goes: a swatch circle and its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSlot {
    pub swatch: Point,
    pub text_anchor: Point,
    pub align: TextAlign,
}

/// Pixel layout of the rings and legend for one box size.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Edge of the square holding the rings.
    pub max_size: f64,
    /// Size the component asks its host for.
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    pub spacing: f64,
    pub center: Point,
    /// Outer radius of each ring, outermost first.
    pub radii: Vec<f64>,
    pub legend_row_height: f64,
    pub swatch_radius: f64,
    pub legend: Vec<LegendSlot>,
}

impl Geometry {
    pub fn compute(
        spec: MeasureSpec,
        ring_count: usize,
        legend_enabled: bool,
        thickness: Dimension,
        spacing: Dimension,
    ) -> Self {
        let max_size = spec.width.min(spec.height).max(0.0);
        let n = ring_count as f64;

        let unit = 2.0 * max_size / (n + 2.0) / 5.0;
        let thickness = thickness.resolve(THICKNESS_SHARE * unit);
        let spacing = spacing.resolve(SPACING_SHARE * unit);
        let step = thickness + spacing;

        let outermost = step * (n + 2.0);
        let radii = (0..ring_count)
            .map(|i| outermost - i as f64 * step)
            .collect();

        let height = match (legend_enabled, spec.height_mode) {
            (true, SizeMode::AtMost) => {
                let rows = ((ring_count + 1) / 2 + 1) as f64;
                spec.height.min((thickness + 2.0 * spacing) * rows + max_size)
            }
            (true, _) => spec.height,
            (false, _) => max_size,
        };

        let center = Point::new(max_size / 2.0, max_size / 2.0);
        let swatch_radius = thickness / 4.0;
        let legend_row_height = (height - max_size) / ((ring_count / 2 + 2) as f64);

        let legend = if legend_enabled && height > max_size {
            legend_slots(
                ring_count,
                center.x,
                outermost / 8.0,
                max_size + legend_row_height / 2.0,
                legend_row_height,
                swatch_radius,
            )
        } else {
            Vec::new()
        };

        log::debug!(
            "layout {}x{} for {} rings: thickness {:.2}, spacing {:.2}",
            max_size,
            height,
            ring_count,
            thickness,
            spacing
        );

        Self {
            max_size,
            width: max_size,
            height,
            thickness,
            spacing,
            center,
            radii,
            legend_row_height,
            swatch_radius,
            legend,
        }
    }

    /// Baseline-left anchor of the percentage hint drawn over ring `index`.
    pub fn hint_anchor(&self, index: usize) -> Option<Point> {
        self.radii.get(index).map(|radius| {
            Point::new(
                self.center.x - 2.2 * self.thickness,
                self.center.y - radius + self.thickness * 7.0 / 9.0,
            )
        })
    }

    pub fn hint_text_size(&self, scale_factor: f64) -> f64 {
        self.thickness / 5.0 * scale_factor
    }
}

/// Two columns around the center, filled left then right before moving down
/// a row.
fn legend_slots(
    ring_count: usize,
    center_x: f64,
    column_offset: f64,
    first_row: f64,
    row_height: f64,
    swatch_radius: f64,
) -> Vec<LegendSlot> {
    let (left, right) = (center_x - column_offset, center_x + column_offset);
    let mut y = first_row;

    (0..ring_count)
        .map(|i| {
            let slot = if i % 2 == 0 {
                LegendSlot {
                    swatch: Point::new(left, y),
                    text_anchor: Point::new(left - 2.0 * swatch_radius, y + swatch_radius),
                    align: TextAlign::Right,
                }
            } else {
                LegendSlot {
                    swatch: Point::new(right, y),
                    text_anchor: Point::new(right + 2.0 * swatch_radius, y + swatch_radius),
                    align: TextAlign::Left,
                }
            };
            if i % 2 == 1 {
                y += row_height;
            }
            slot
        })
        .collect()
}
