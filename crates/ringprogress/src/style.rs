use crate::error::RingError;
use derive_more::{Deref, From, Into};
use palette::{Srgb, Srgba, WithAlpha};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// The four paints every ring carries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(
    ascii_case_insensitive,
    parse_err_ty = RingError,
    parse_err_fn = unknown_role
)]
#[serde(rename_all = "lowercase")]
pub enum PaintRole {
    /// Static background annulus.
    #[strum(to_string = "ring", serialize = "background")]
    Ring,
    /// Outline of the progress sweep.
    #[strum(to_string = "stroke", serialize = "outline")]
    Stroke,
    /// Interior of the progress sweep.
    #[strum(to_string = "fill")]
    Fill,
    /// Percentage hint and legend text.
    #[strum(to_string = "hint", serialize = "text")]
    Hint,
}

fn unknown_role(s: &str) -> RingError {
    RingError::UnknownRole(s.to_string())
}

/// A color written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into)]
pub struct HexColor(Srgba<f64>);

impl FromStr for HexColor {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RingError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let (digits, alpha) = match hex.len() {
            6 => (hex, 255),
            8 => (
                &hex[..6],
                u8::from_str_radix(&hex[6..], 16).map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };

        let color = Srgb::<u8>::from_str(digits).map_err(|_| invalid())?;
        Ok(Self(color.into_format::<f64>().with_alpha(alpha as f64 / 255.0)))
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Srgba<f64> {
    Srgb::new(r, g, b).into_format::<f64>().with_alpha(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Stroke,
    Fill,
}

/// Immutable description of how one path or text run is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Srgba<f64>,
    pub style: PaintStyle,
    pub stroke_width: f64,
    pub anti_alias: bool,
}

impl Paint {
    pub fn stroke(color: Srgba<f64>, width: f64) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width: width,
            anti_alias: true,
        }
    }

    pub fn fill(color: Srgba<f64>) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            anti_alias: true,
        }
    }

    pub fn with_color(self, color: Srgba<f64>) -> Self {
        Self { color, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingStyle {
    pub ring: Paint,
    pub stroke: Paint,
    pub fill: Paint,
    pub hint: Paint,
}

impl RingStyle {
    /// Light blue palette with a `2 * scale_factor` stroke.
    pub fn with_defaults(scale_factor: f64) -> Self {
        let width = DEFAULT_STROKE_WIDTH * scale_factor;
        Self {
            ring: Paint::stroke(rgb(228, 248, 254), width),
            stroke: Paint::stroke(rgb(130, 200, 240), width),
            fill: Paint::fill(rgb(184, 228, 253)),
            hint: Paint {
                anti_alias: false,
                ..Paint::fill(rgb(130, 200, 240))
            },
        }
    }

    pub fn paint(&self, role: PaintRole) -> &Paint {
        match role {
            PaintRole::Ring => &self.ring,
            PaintRole::Stroke => &self.stroke,
            PaintRole::Fill => &self.fill,
            PaintRole::Hint => &self.hint,
        }
    }

    fn paint_mut(&mut self, role: PaintRole) -> &mut Paint {
        match role {
            PaintRole::Ring => &mut self.ring,
            PaintRole::Stroke => &mut self.stroke,
            PaintRole::Fill => &mut self.fill,
            PaintRole::Hint => &mut self.hint,
        }
    }
}

/// Per-ring paints. Grows with the ring count but never shrinks; entries past
/// the current ring count are kept and reused if the count grows again.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    entries: Vec<RingStyle>,
    ring_count: usize,
    scale_factor: f64,
}

impl StyleRegistry {
    pub fn new(ring_count: usize, scale_factor: f64) -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            ring_count: 0,
            scale_factor,
        };
        registry.resize(ring_count);
        registry
    }

    pub fn resize(&mut self, ring_count: usize) {
        let missing = ring_count.saturating_sub(self.entries.len());
        let scale_factor = self.scale_factor;
        self.entries
            .extend((0..missing).map(|_| RingStyle::with_defaults(scale_factor)));
        self.ring_count = ring_count;
    }

    /// Number of stored entries, which may exceed the ring count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Styles of the rings currently shown.
    pub fn active(&self) -> &[RingStyle] {
        &self.entries[..self.ring_count]
    }

    pub fn get(&self, index: usize) -> Result<&RingStyle, RingError> {
        RingError::check_index(index, self.ring_count)?;
        Ok(&self.entries[index])
    }

    pub fn set_color(
        &mut self,
        index: usize,
        role: PaintRole,
        color: Srgba<f64>,
    ) -> Result<(), RingError> {
        RingError::check_index(index, self.ring_count)?;
        let paint = self.entries[index].paint_mut(role);
        *paint = paint.with_color(color);
        Ok(())
    }

    pub fn set_paint(
        &mut self,
        index: usize,
        role: PaintRole,
        paint: Paint,
    ) -> Result<(), RingError> {
        RingError::check_index(index, self.ring_count)?;
        *self.entries[index].paint_mut(role) = paint;
        Ok(())
    }
}
