//! Outline geometry for rings.
//!
//! Angles are radians measured clockwise from the positive x axis in a y-down
//! coordinate space, so `3π/2` points straight up.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Angle of the top of a circle, where every sweep begins.
pub const TOP: f64 = 3.0 * FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Circular arc. A negative `sweep` runs counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start: f64,
    pub sweep: f64,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start: f64, sweep: f64) -> Self {
        Self {
            center,
            radius,
            start,
            sweep,
        }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, TOP, TAU)
    }

    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }

    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end())
    }
}

/// Arcs joined end to start by straight segments, closed back to the first
/// arc's start point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contour {
    pub arcs: Vec<Arc>,
}

impl Contour {
    pub fn new(arcs: Vec<Arc>) -> Self {
        Self { arcs }
    }

    pub fn start_point(&self) -> Option<Point> {
        self.arcs.first().map(Arc::start_point)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.arcs.last().map(Arc::end_point)
    }

    /// True when the final arc lands on the starting point, so closing the
    /// contour adds no visible segment.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start.distance(end) <= tolerance,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub contours: Vec<Contour>,
}

impl Path {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        !self.contours.is_empty() && self.contours.iter().all(|c| c.is_closed(tolerance))
    }

    /// Two clockwise circles bounding the annulus between `outer_radius` and
    /// `outer_radius - thickness`.
    pub fn ring_outline(center: Point, outer_radius: f64, thickness: f64) -> Self {
        Self::new(vec![
            Contour::new(vec![Arc::circle(center, outer_radius)]),
            Contour::new(vec![Arc::circle(center, outer_radius - thickness)]),
        ])
    }

    /// The swept part of a ring, starting at the top and running clockwise by
    /// `progress` turns, with half-circle caps at both ends.
    ///
    /// `progress` is not clamped: values above one wrap past the start and
    /// negative values sweep counter-clockwise.
    pub fn progress_outline(
        center: Point,
        outer_radius: f64,
        thickness: f64,
        progress: f64,
    ) -> Self {
        let sweep = TAU * progress;
        let inner_radius = outer_radius - thickness;
        let cap_radius = thickness / 2.0;
        let mid_radius = outer_radius - cap_radius;

        let end_cap_center = Point::new(
            center.x + mid_radius * sweep.sin(),
            center.y - mid_radius * sweep.cos(),
        );
        let start_cap_center = Point::new(center.x, center.y - mid_radius);

        Self::new(vec![Contour::new(vec![
            Arc::new(center, outer_radius, TOP, sweep),
            Arc::new(end_cap_center, cap_radius, TOP + sweep, PI),
            Arc::new(center, inner_radius, TOP + sweep, -sweep),
            Arc::new(start_cap_center, cap_radius, FRAC_PI_2, PI),
        ])])
    }
}
