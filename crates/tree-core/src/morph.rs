//! Morph point model and the easing curves every blend goes through.

use glam::{Mat4, Quat, Vec3};

/// Position, orientation and uniform scale of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Lerp position/scale and slerp rotation by `t`.
    #[inline]
    pub fn blend(&self, to: &Transform, t: f32) -> Transform {
        Transform {
            position: self.position.lerp(to.position, t),
            rotation: self.rotation.slerp(to.rotation, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }

    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// One procedurally placed element: a scatter and a tree transform, fixed at
/// construction. Only the interpolated transform derived from them changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphPoint {
    /// Stable per-element noise seed, independent of array order.
    pub seed: f32,
    pub scatter: Transform,
    pub tree: Transform,
}

impl MorphPoint {
    pub fn new(seed: f32, scatter: Transform, tree: Transform) -> Self {
        Self {
            seed,
            scatter,
            tree,
        }
    }

    /// Interpolated transform for an already eased progress value.
    #[inline]
    pub fn at(&self, eased: f32) -> Transform {
        self.scatter.blend(&self.tree, eased)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Symmetric cubic ease-in-out: `4t³` below 0.5, mirrored above.
#[inline]
pub fn ease_progress(t: f32) -> f32 {
    let t = clamp_progress(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Hermite smoothstep on an input clamped to [0, 1].
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = clamp_progress(x);
    x * x * (3.0 - 2.0 * x)
}

/// Clamp to [0, 1]; NaN maps to 0.
#[inline]
pub fn clamp_progress(p: f32) -> f32 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
