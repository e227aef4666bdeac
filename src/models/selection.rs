use super::{RankedResult, RouteCandidate};
use crate::error::RangeError;
use crate::map::LayerHandle;

/// Single source of truth for the ranked routes, the active route and the
/// map layers currently drawn for them.
///
/// Invariants:
/// - `active_index` is `None` exactly when `ranked` is empty, otherwise it
///   is a valid index into `ranked`
/// - after a completed render, `layers` holds one handle per drawn route
///   (at most three), index-aligned with the head of `ranked`
#[derive(Debug, Default)]
pub struct SelectionState {
    ranked: RankedResult,
    active_index: Option<usize>,
    layers: Vec<LayerHandle>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ranked routes, activating the first one.
    ///
    /// Layer handles are forgotten, so the caller must have removed the old
    /// layers from the map first (see [`crate::render::release_layers`]).
    pub fn install(&mut self, result: RankedResult) {
        self.active_index = if result.is_empty() { None } else { Some(0) };
        self.ranked = result;
        self.layers.clear();
    }

    /// Make route `index` the active one
    ///
    /// # Errors
    ///
    /// Returns `RangeError` if `index` is not a valid route index; the active
    /// route is left unchanged.
    pub fn select_index(&mut self, index: usize) -> Result<(), RangeError> {
        if index >= self.ranked.len() {
            return Err(RangeError {
                index,
                len: self.ranked.len(),
            });
        }
        self.active_index = Some(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.ranked = RankedResult::default();
        self.active_index = None;
        self.layers.clear();
    }

    #[must_use]
    pub fn ranked(&self) -> &RankedResult {
        &self.ranked
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    #[must_use]
    pub fn active_route(&self) -> Option<&RouteCandidate> {
        self.active_index.and_then(|i| self.ranked.get(i))
    }

    #[must_use]
    pub fn layers(&self) -> &[LayerHandle] {
        &self.layers
    }

    pub(crate) fn take_layers(&mut self) -> Vec<LayerHandle> {
        std::mem::take(&mut self.layers)
    }

    pub(crate) fn set_layers(&mut self, layers: Vec<LayerHandle>) {
        self.layers = layers;
    }
}
