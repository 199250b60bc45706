//! Procedural placement for the scattered cloud and the assembled tree.
//!
//! Every function here is pure apart from advancing the random source it is
//! handed. Callers seed a `StdRng` for the batches; the garland beads use
//! [`HashRng`] so each bead's scatter placement is reproducible from its index
//! alone.

use crate::config::{ConeParams, PointSetConfig};
use crate::constants::*;
use crate::curve::CatmullRomCurve;
use crate::morph::{lerp, MorphPoint, Transform};
use glam::{EulerRot, Mat3, Quat, Vec3};
use rand::{Rng, RngCore};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Uniform random point inside a sphere (cube-root radius avoids clustering at the centre).
pub fn sample_sphere_volume<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let w: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * w.cbrt();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    )
}

/// Frustum radius at world height `y`; heights outside the frustum clamp to the end radii.
#[inline]
pub fn frustum_radius_at(y: f32, cone: &ConeParams) -> f32 {
    let frac = ((y - cone.y_base) / cone.height).clamp(0.0, 1.0);
    lerp(cone.radius_base, cone.radius_top, frac)
}

/// Point near the frustum's lateral surface, weighted toward the base.
///
/// Height fraction is `raw^height_bias`, so `height_bias > 1` pulls points
/// down; radius is `radius_at_height * raw2^surface_bias`, so
/// `surface_bias < 1` pushes them out toward the shell.
pub fn sample_frustum_biased<R: Rng + ?Sized>(
    cone: &ConeParams,
    rng: &mut R,
    surface_bias: f32,
    height_bias: f32,
) -> Vec3 {
    let raw: f32 = rng.gen();
    let raw2: f32 = rng.gen();
    let azimuth = TAU * rng.gen::<f32>();
    let y = cone.y_base + raw.powf(height_bias) * cone.height;
    let r = frustum_radius_at(y, cone) * raw2.powf(surface_bias);
    Vec3::new(r * azimuth.cos(), y, r * azimuth.sin())
}

/// Three independent Euler rotations in [−π/2, π/2]. Not uniform on SO(3);
/// only used for the scatter cloud.
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let mut angle = || (rng.gen::<f32>() * 2.0 - 1.0) * FRAC_PI_2;
    let (a, b, c) = (angle(), angle(), angle());
    Quat::from_euler(EulerRot::XYZ, a, b, c)
}

/// Horizontal unit direction from the vertical axis to `position`; +Z on the axis.
#[inline]
pub fn radial_direction(position: Vec3) -> Vec3 {
    Vec3::new(position.x, 0.0, position.z)
        .try_normalize()
        .unwrap_or(Vec3::Z)
}

/// Rotation whose +Z axis points along `forward`, with `up` as the secondary axis.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.try_normalize().unwrap_or(Vec3::Z);
    let right = up.cross(f).try_normalize().unwrap_or_else(|| {
        // forward parallel to up
        let seed_axis = if f.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
        (seed_axis - f * seed_axis.dot(f)).normalize()
    });
    let true_up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, f))
}

/// Forward (+Z) pointing radially away from the tree's centre line, world up fixed.
#[inline]
pub fn outward_orientation(position: Vec3) -> Quat {
    look_rotation(radial_direction(position), Vec3::Y)
}

#[inline]
pub fn element_seed(index: usize) -> f32 {
    (index + 1) as f32 * SEED_PRIME
}

/// Scatter/tree pairs for one batch: sphere cloud versus frustum shell.
pub fn build_morph_point_set<R: Rng + ?Sized>(
    count: usize,
    config: &PointSetConfig,
    cone: &ConeParams,
    rng: &mut R,
) -> Vec<MorphPoint> {
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let scatter_pos = sample_sphere_volume(config.scatter_radius, rng);
        let scatter_rot = random_orientation(rng);

        let mut tree_pos =
            sample_frustum_biased(cone, rng, config.surface_bias, config.height_bias);
        if config.radial_offset != 0.0 {
            tree_pos += radial_direction(tree_pos) * config.radial_offset;
        }
        let tree_rot = outward_orientation(tree_pos);

        // One scale for both configurations: elements keep their size while morphing.
        let scale = rng.gen_range(config.scale_min..=config.scale_max);

        points.push(MorphPoint::new(
            element_seed(i),
            Transform::new(scatter_pos, scatter_rot, scale),
            Transform::new(tree_pos, tree_rot, scale),
        ));
    }
    points
}

/// Deterministic trigonometric hash: `fract(sin(n · 12.9898) · 43758.5453)`, in [0, 1).
pub fn hash01(n: f64) -> f32 {
    let x = (n * 12.9898).sin() * 43758.5453;
    let f = (x - x.floor()) as f32;
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

// Draws per index; keeps per-index streams from overlapping.
const HASH_STREAM_STRIDE: f64 = 64.0;

/// Random source for one element index, built on [`hash01`].
///
/// Two generators created for the same index yield the same sequence.
#[derive(Clone, Debug)]
pub struct HashRng {
    base: f64,
    counter: u32,
}

impl HashRng {
    pub fn for_index(index: usize) -> Self {
        Self {
            base: index as f64 * HASH_STREAM_STRIDE,
            counter: 0,
        }
    }

    /// Next value in [0, 1).
    pub fn next_unit(&mut self) -> f32 {
        self.counter = self.counter.wrapping_add(1);
        hash01(self.base + self.counter as f64)
    }
}

impl RngCore for HashRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_unit() as f64 * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 32) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Point on the garland spiral at parameter `t` (0 = base, 1 = top).
pub fn spiral_point(cone: &ConeParams, t: f32, turns: f32) -> Vec3 {
    let y = cone.y_base + t * cone.height;
    let angle = t * turns * TAU;
    let r = frustum_radius_at(y, cone) + SPIRAL_SURFACE_OFFSET;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

#[inline]
fn spiral_param(i: usize, count: usize) -> f32 {
    if count > 1 {
        i as f32 / (count - 1) as f32
    } else {
        0.0
    }
}

/// Garland beads: spiral positions when assembled, a donut around the tree when scattered.
pub fn build_spiral_point_set(cone: &ConeParams, count: usize, turns: f32) -> Vec<MorphPoint> {
    let margin = GARLAND_SCATTER_HEIGHT_MARGIN * cone.height;
    (0..count)
        .map(|i| {
            let tree_pos = spiral_point(cone, spiral_param(i, count), turns);
            let tree_rot = outward_orientation(tree_pos);

            let mut rng = HashRng::for_index(i);
            let radius = lerp(
                GARLAND_SCATTER_RADIUS_MIN,
                GARLAND_SCATTER_RADIUS_MAX,
                rng.next_unit(),
            );
            let azimuth = rng.next_unit() * TAU;
            let y = cone.y_base - margin + rng.next_unit() * (cone.height + 2.0 * margin);
            let scatter_pos = Vec3::new(radius * azimuth.cos(), y, radius * azimuth.sin());
            let scatter_rot = random_orientation(&mut rng);
            let scale = lerp(BEAD_SCALE_MIN, BEAD_SCALE_MAX, rng.next_unit());

            MorphPoint::new(
                element_seed(i),
                Transform::new(scatter_pos, scatter_rot, scale),
                Transform::new(tree_pos, tree_rot, scale),
            )
        })
        .collect()
}

/// Smooth curve through `sample_count` spiral points, used for the garland tube.
pub fn build_spiral_curve(cone: &ConeParams, turns: f32, sample_count: usize) -> CatmullRomCurve {
    let n = sample_count.max(2);
    let points = (0..n)
        .map(|i| spiral_point(cone, spiral_param(i, n), turns))
        .collect();
    CatmullRomCurve::new(points, GARLAND_TENSION)
}

/// Ring layout of the panel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub layers: usize,
    pub per_layer: usize,
}

impl GridLayout {
    /// `round(sqrt(count))` rings of `ceil(count / layers)` panels.
    pub fn for_count(count: usize) -> Self {
        let layers = ((count as f32).sqrt().round() as usize).max(1);
        let per_layer = count.div_ceil(layers).max(1);
        Self { layers, per_layer }
    }

    /// `(layer, slot)` of panel `index`.
    #[inline]
    pub fn slot(&self, index: usize) -> (usize, usize) {
        (index / self.per_layer, index % self.per_layer)
    }

    #[inline]
    pub fn height_fraction(&self, layer: usize) -> f32 {
        (layer as f32 + 0.8) / (self.layers as f32 + 0.6)
    }
}

/// Panels arranged in rings just outside the shell, facing outward; scattered in a sphere.
pub fn build_grid_panel_points<R: Rng + ?Sized>(
    cone: &ConeParams,
    count: usize,
    scatter_radius: f32,
    rng: &mut R,
) -> Vec<MorphPoint> {
    let grid = GridLayout::for_count(count);
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let (layer, slot) = grid.slot(i);
        let y = cone.y_base + grid.height_fraction(layer) * cone.height;
        let r = frustum_radius_at(y, cone) * PANEL_RADIUS_FACTOR;
        let azimuth =
            slot as f32 / grid.per_layer as f32 * TAU + layer as f32 * PANEL_LAYER_ANGLE_OFFSET;
        let tree_pos = Vec3::new(r * azimuth.cos(), y, r * azimuth.sin());

        let scatter_pos = sample_sphere_volume(scatter_radius, rng);
        let scatter_rot = random_orientation(rng);

        points.push(MorphPoint::new(
            element_seed(i),
            Transform::new(scatter_pos, scatter_rot, PANEL_SCALE),
            Transform::new(tree_pos, outward_orientation(tree_pos), PANEL_SCALE),
        ));
    }
    points
}
