//! Per-frame transforms for homogeneous instanced batches (needles, ornaments, beads).

use crate::constants::{IDLE_FLOAT_SEED_SCALE, IDLE_FLOAT_SPEED};
use crate::morph::{clamp_progress, ease_progress, MorphPoint};
use glam::Mat4;

/// Ordered per-instance transforms handed to the renderer.
///
/// Allocated once at the batch size. `version` is bumped once per completed frame.
#[derive(Clone, Debug)]
pub struct InstanceBuffer {
    transforms: Vec<Mat4>,
    version: u64,
}

impl InstanceBuffer {
    pub fn with_len(len: usize) -> Self {
        Self {
            transforms: vec![Mat4::IDENTITY; len],
            version: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Write slot `index`; out-of-range writes are dropped.
    #[inline]
    pub fn set(&mut self, index: usize, transform: Mat4) {
        if let Some(slot) = self.transforms.get_mut(index) {
            *slot = transform;
        }
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Vertical idle-float offset; vanishes as the tree assembles.
#[inline]
pub fn idle_float(elapsed: f32, seed: f32, amplitude: f32, eased: f32) -> f32 {
    (elapsed * IDLE_FLOAT_SPEED + seed * IDLE_FLOAT_SEED_SCALE).sin() * amplitude * (1.0 - eased)
}

/// Drives one batch: owns its immutable morph points and its output buffer.
///
/// The loop writes into the pre-allocated buffer and works on `Copy` glam
/// values only, so a frame never allocates.
#[derive(Clone, Debug)]
pub struct InstancedDriver {
    points: Vec<MorphPoint>,
    buffer: InstanceBuffer,
    float_amplitude: f32,
}

impl InstancedDriver {
    pub fn new(points: Vec<MorphPoint>, float_amplitude: f32) -> Self {
        let buffer = InstanceBuffer::with_len(points.len());
        Self {
            points,
            buffer,
            float_amplitude,
        }
    }

    pub fn points(&self) -> &[MorphPoint] {
        &self.points
    }

    pub fn buffer(&self) -> &InstanceBuffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Interpolate every element by the eased `progress` and publish the buffer once.
    pub fn update(&mut self, progress: f32, elapsed: f32) {
        let eased = ease_progress(clamp_progress(progress));
        for (i, point) in self.points.iter().enumerate() {
            let mut t = point.at(eased);
            t.position.y += idle_float(elapsed, point.seed, self.float_amplitude, eased);
            self.buffer.set(i, t.to_matrix());
        }
        self.buffer.mark_dirty();
    }
}
