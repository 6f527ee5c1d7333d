use crate::animation::{AnimationDriver, OnComplete, TickHandle, TickOutcome};
use crate::canvas::Canvas;
use crate::error::RingError;
use crate::layout::{Dimension, Geometry, LayoutConfig, MeasureSpec};
use crate::render;
use crate::ring::{Explanation, RingSet};
use crate::style::{Paint, PaintRole};
use palette::Srgba;
use std::time::Duration;

/// A concentric ring progress component.
///
/// Owns the ring values, the layout options and the sweep animation. The host
/// calls [`measure`](Self::measure) when its size changes, forwards frame
/// times to [`tick`](Self::tick) while animating, and calls
/// [`draw`](Self::draw) for every frame.
pub struct RingProgress {
    rings: RingSet,
    layout: LayoutConfig,
    animation: AnimationDriver,
    scale_factor: f64,
    spec: Option<MeasureSpec>,
    geometry: Option<Geometry>,
}

impl RingProgress {
    pub fn new(ring_count: usize, scale_factor: f64) -> Self {
        Self {
            rings: RingSet::new(ring_count, scale_factor),
            layout: LayoutConfig::default(),
            animation: AnimationDriver::new(),
            scale_factor,
            spec: None,
            geometry: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self.relayout();
        self
    }

    pub fn rings(&self) -> &RingSet {
        &self.rings
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn ring_count(&self) -> usize {
        self.rings.ring_count()
    }

    pub fn set_ring_count(&mut self, ring_count: usize) {
        self.rings.set_ring_count(ring_count);
        self.relayout();
    }

    /// Resolved ring thickness, once a size is known.
    pub fn thickness(&self) -> Option<f64> {
        self.geometry.as_ref().map(|g| g.thickness)
    }

    pub fn spacing(&self) -> Option<f64> {
        self.geometry.as_ref().map(|g| g.spacing)
    }

    pub fn pin_thickness(&mut self, thickness: f64) {
        self.layout.thickness = Dimension::Pinned(thickness);
        self.relayout();
    }

    pub fn release_thickness(&mut self) {
        self.layout.thickness = Dimension::Auto;
        self.relayout();
    }

    pub fn pin_spacing(&mut self, spacing: f64) {
        self.layout.spacing = Dimension::Pinned(spacing);
        self.relayout();
    }

    pub fn release_spacing(&mut self) {
        self.layout.spacing = Dimension::Auto;
        self.relayout();
    }

    pub fn set_show_progress_hint(&mut self, show: bool) {
        self.layout.show_progress_hint = show;
    }

    pub fn set_show_legend(&mut self, show: bool) {
        self.layout.show_legend = show;
        self.relayout();
    }

    pub fn set_progress_list(&mut self, progress: Vec<f64>) {
        self.rings.set_progress_list(progress);
    }

    pub fn set_progress(&mut self, index: usize, progress: f64) -> Result<(), RingError> {
        self.rings.set_progress(index, progress)
    }

    pub fn set_explain_list(&mut self, explanations: Vec<Explanation>) {
        self.rings.set_explain_list(explanations);
    }

    pub fn set_explain(
        &mut self,
        index: usize,
        explanation: impl Into<Explanation>,
    ) -> Result<(), RingError> {
        self.rings.set_explain(index, explanation)
    }

    pub fn set_color(
        &mut self,
        index: usize,
        role: PaintRole,
        color: Srgba<f64>,
    ) -> Result<(), RingError> {
        self.rings.styles_mut().set_color(index, role, color)
    }

    pub fn set_paint(
        &mut self,
        index: usize,
        role: PaintRole,
        paint: Paint,
    ) -> Result<(), RingError> {
        self.rings.styles_mut().set_paint(index, role, paint)
    }

    /// Lays the rings out for the space the host offers and returns the
    /// width and height the component wants.
    pub fn measure(&mut self, spec: MeasureSpec) -> (f64, f64) {
        self.spec = Some(spec);
        self.relayout();
        self.geometry
            .as_ref()
            .map_or((0.0, 0.0), |g| (g.width, g.height))
    }

    fn relayout(&mut self) {
        if let Some(spec) = self.spec {
            self.geometry = Some(Geometry::compute(
                spec,
                self.rings.ring_count(),
                self.layout.show_legend,
                self.layout.thickness,
                self.layout.spacing,
            ));
        }
    }

    /// Replays the sweep from zero to the current values.
    pub fn redraw(&mut self) {
        self.redraw_with(None);
    }

    pub fn redraw_with(&mut self, on_complete: Option<OnComplete>) {
        let targets = self.rings.progress().to_vec();
        self.animation.start(targets, &mut self.rings, on_complete);
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Hands over the host callback that drives the current sweep.
    pub fn attach_ticker(&mut self, handle: Box<dyn TickHandle>) {
        self.animation.attach(handle);
    }

    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        self.animation.tick(now, &mut self.rings)
    }

    /// Paints the current frame. When the canvas bounds differ from the last
    /// measured size, they are taken as an exact size first.
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), C::Error> {
        let (width, height) = canvas.measure_bounds();
        let stale = self
            .spec
            .is_none_or(|spec| spec.width != width || spec.height != height);
        if self.geometry.is_none() || stale {
            self.measure(MeasureSpec::exactly(width, height));
        }
        match &self.geometry {
            Some(geometry) => render::draw(
                canvas,
                &self.rings,
                &self.layout,
                geometry,
                self.scale_factor,
            ),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::RecordingCanvas;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_draw_measures_from_canvas() {
        let mut view = RingProgress::new(3, 1.0);
        view.set_progress_list(vec![0.0, 0.5, 1.0]);
        let mut canvas = RecordingCanvas::new(300.0, 300.0);
        view.draw(&mut canvas).unwrap();

        let geometry = view.geometry().unwrap();
        assert_eq!(geometry.max_size, 300.0);
        assert!((geometry.radii[0] - 120.0).abs() < 1e-9);
        assert_eq!(canvas.ops.len(), 9);
    }

    #[test]
    fn test_draw_follows_canvas_size() {
        let mut view = RingProgress::new(3, 1.0);
        view.draw(&mut RecordingCanvas::new(300.0, 300.0)).unwrap();
        view.draw(&mut RecordingCanvas::new(600.0, 600.0)).unwrap();
        assert_eq!(view.geometry().map(|g| g.max_size), Some(600.0));

        // a matching measure is kept, including its height mode
        let (_, h) = view.measure(MeasureSpec::at_most(300.0, 800.0));
        view.draw(&mut RecordingCanvas::new(300.0, 800.0)).unwrap();
        assert_eq!(view.geometry().map(|g| g.height), Some(h));
        assert!(h < 800.0);
    }

    #[test]
    fn test_redraw_starts_from_zero() {
        let mut view = RingProgress::new(2, 1.0);
        view.set_progress_list(vec![0.4, 0.8]);
        view.redraw();
        assert!(view.is_animating());
        assert_eq!(view.rings().progress(), &[0.0, 0.0]);
    }

    #[test]
    fn test_pin_and_release() {
        let mut view = RingProgress::new(3, 1.0);
        view.measure(MeasureSpec::exactly(300.0, 300.0));
        let auto = view.thickness().unwrap();

        view.pin_thickness(10.0);
        assert_eq!(view.thickness(), Some(10.0));

        // a pinned value survives size and count changes
        view.measure(MeasureSpec::exactly(600.0, 600.0));
        view.set_ring_count(5);
        assert_eq!(view.thickness(), Some(10.0));

        view.release_thickness();
        view.set_ring_count(3);
        view.measure(MeasureSpec::exactly(300.0, 300.0));
        assert_eq!(view.thickness(), Some(auto));
    }

    #[test]
    fn test_spacing_rederives_on_count_change() {
        let mut view = RingProgress::new(3, 1.0);
        view.measure(MeasureSpec::exactly(300.0, 300.0));
        let three = view.spacing().unwrap();
        view.set_ring_count(8);
        assert!(view.spacing().unwrap() < three);

        view.pin_spacing(1.0);
        view.set_ring_count(2);
        assert_eq!(view.spacing(), Some(1.0));
        view.release_spacing();
        assert!(view.spacing().unwrap() > three);
    }

    #[test]
    fn test_legend_toggle_changes_measured_height() {
        let mut view = RingProgress::new(4, 1.0);
        let (w, h) = view.measure(MeasureSpec::at_most(300.0, 800.0));
        assert_eq!(w, 300.0);
        assert!(h > 300.0 && h < 800.0);

        view.set_show_legend(false);
        assert_eq!(view.geometry().map(|g| g.height), Some(300.0));
    }

    #[test]
    fn test_redraw_animates_to_current_values() {
        let mut view = RingProgress::new(2, 1.0);
        view.set_progress_list(vec![0.4, 0.8]);
        let finished = Rc::new(Cell::new(false));
        let flag = finished.clone();
        view.redraw_with(Some(Box::new(move || flag.set(true))));

        assert_eq!(view.tick(Duration::from_millis(100)), TickOutcome::Continue);
        assert_eq!(view.rings().progress(), &[0.0, 0.0]);

        view.tick(Duration::from_millis(600));
        assert!((view.rings().progress()[1] - 0.4).abs() < 1e-9);

        assert_eq!(view.tick(Duration::from_millis(1_100)), TickOutcome::Finished);
        assert_eq!(view.rings().progress(), &[0.4, 0.8]);
        assert!(finished.get());
        assert!(!view.is_animating());
    }

    #[test]
    fn test_indexed_errors_surface() {
        let mut view = RingProgress::new(2, 1.0);
        assert!(view.set_progress(2, 0.1).is_err());
        assert!(view.set_explain(5, "x").is_err());
        assert!(
            view.set_color(2, PaintRole::Fill, Srgba::new(0.0, 0.0, 0.0, 1.0))
                .is_err()
        );
        let red = Paint::fill(Srgba::new(1.0, 0.0, 0.0, 1.0));
        assert!(view.set_paint(1, PaintRole::Hint, red).is_ok());
    }
}
