//! Morph state shared by the input handlers and the per-frame drivers.
//!
//! The store is a plain value owned by the scene root and passed by reference;
//! several scenes (or tests) can each hold their own.

use crate::constants::MODE_THRESHOLD;
use crate::morph::clamp_progress;

/// Coarse interaction classification of the morph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphMode {
    Scattered,
    TreeShape,
}

impl MorphMode {
    /// `TreeShape` once progress is strictly past the 0.5 threshold.
    #[inline]
    pub fn classify(progress: f32) -> Self {
        if progress > MODE_THRESHOLD {
            MorphMode::TreeShape
        } else {
            MorphMode::Scattered
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MorphState {
    mode: MorphMode,
    progress: f32,
    selected_panel: Option<usize>,
    revision: u64,
}

impl Default for MorphState {
    /// Fully assembled, nothing selected.
    fn default() -> Self {
        Self {
            mode: MorphMode::TreeShape,
            progress: 1.0,
            selected_panel: None,
            revision: 0,
        }
    }
}

impl MorphState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> MorphMode {
        self.mode
    }

    /// Raw (un-eased) progress in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn selected_panel(&self) -> Option<usize> {
        self.selected_panel
    }

    /// Bumped by every mutation.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flip the mode and snap progress to its end value (no tween).
    pub fn toggle(&mut self) {
        let (mode, progress) = match self.mode {
            MorphMode::TreeShape => (MorphMode::Scattered, 0.0),
            MorphMode::Scattered => (MorphMode::TreeShape, 1.0),
        };
        self.mode = mode;
        self.progress = progress;
        self.touch();
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = clamp_progress(progress);
        self.touch();
    }

    pub fn set_mode(&mut self, mode: MorphMode) {
        self.mode = mode;
        self.touch();
    }

    /// No bounds validation here; callers pass a valid panel index.
    pub fn select_panel(&mut self, index: usize) {
        self.selected_panel = Some(index);
        self.touch();
    }

    pub fn clear_selection(&mut self) {
        self.selected_panel = None;
        self.touch();
    }

    #[inline]
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
