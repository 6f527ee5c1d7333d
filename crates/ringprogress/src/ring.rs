use crate::error::RingError;
use crate::style::StyleRegistry;
use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Short legend text for one ring.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct Explanation(String);

crate::impl_string_newtype!(Explanation);

/// Values and paints of every ring.
///
/// `progress` and `explanations` always hold exactly `ring_count` entries; the
/// style registry holds at least that many.
#[derive(Debug, Clone)]
pub struct RingSet {
    progress: Vec<f64>,
    explanations: Vec<Explanation>,
    styles: StyleRegistry,
}

impl RingSet {
    pub fn new(ring_count: usize, scale_factor: f64) -> Self {
        Self {
            progress: vec![0.0; ring_count],
            explanations: vec![Explanation::default(); ring_count],
            styles: StyleRegistry::new(ring_count, scale_factor),
        }
    }

    pub fn ring_count(&self) -> usize {
        self.progress.len()
    }

    /// Truncates or zero/blank-pads the value lists and grows the styles.
    pub fn set_ring_count(&mut self, ring_count: usize) {
        self.progress.resize(ring_count, 0.0);
        self.explanations.resize(ring_count, Explanation::default());
        self.styles.resize(ring_count);
    }

    pub fn progress(&self) -> &[f64] {
        &self.progress
    }

    pub fn explanations(&self) -> &[Explanation] {
        &self.explanations
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn set_progress_list(&mut self, mut progress: Vec<f64>) {
        if progress.len() != self.ring_count() {
            log::warn!(
                "progress list has {} values for {} rings, reconciling",
                progress.len(),
                self.ring_count()
            );
        }
        progress.resize(self.ring_count(), 0.0);
        self.progress = progress;
    }

    pub fn set_explain_list(&mut self, mut explanations: Vec<Explanation>) {
        if explanations.len() != self.ring_count() {
            log::warn!(
                "explain list has {} entries for {} rings, reconciling",
                explanations.len(),
                self.ring_count()
            );
        }
        explanations.resize(self.ring_count(), Explanation::default());
        self.explanations = explanations;
    }

    pub fn set_progress(&mut self, index: usize, progress: f64) -> Result<(), RingError> {
        RingError::check_index(index, self.ring_count())?;
        self.progress[index] = progress;
        Ok(())
    }

    pub fn set_explain(
        &mut self,
        index: usize,
        explanation: impl Into<Explanation>,
    ) -> Result<(), RingError> {
        RingError::check_index(index, self.ring_count())?;
        self.explanations[index] = explanation.into();
        Ok(())
    }

    /// Writes animated values; rings past the end of `values` are left alone.
    pub(crate) fn write_live_progress(&mut self, values: impl IntoIterator<Item = f64>) {
        for (slot, value) in self.progress.iter_mut().zip(values) {
            *slot = value;
        }
    }
}
