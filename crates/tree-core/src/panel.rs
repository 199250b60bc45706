//! Per-frame transforms for the individually addressable photo panels.
//!
//! Each frame every panel resolves a [`PanelMode`] before any transform math:
//! `Focused` (scattered and selected) overrides `Morphing`. A focused panel
//! glides toward a pose in front of the camera; every other panel follows the
//! morph with an outward-facing alignment gated to the end of assembly.

use crate::camera::CameraPose;
use crate::constants::*;
use crate::instanced::idle_float;
use crate::morph::{clamp_progress, ease_progress, smoothstep, MorphPoint, Transform};
use crate::sampler::{look_rotation, outward_orientation};
use crate::state::{MorphMode, MorphState};
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelMode {
    Focused,
    Morphing,
}

/// `Focused` only while scattered and selected; an out-of-range selection never matches.
#[inline]
pub fn resolve_mode(index: usize, state: &MorphState) -> PanelMode {
    match (state.mode(), state.selected_panel()) {
        (MorphMode::Scattered, Some(selected)) if selected == index => PanelMode::Focused,
        _ => PanelMode::Morphing,
    }
}

/// Weight of the strict outward-facing blend: zero until 75% assembled.
#[inline]
pub fn outward_weight(eased: f32) -> f32 {
    smoothstep(((eased - OUTWARD_GATE_START) / OUTWARD_GATE_SPAN).clamp(0.0, 1.0))
}

/// Normal-branch transform of one panel for an eased progress value.
pub fn morph_panel_transform(
    point: &MorphPoint,
    eased: f32,
    elapsed: f32,
    float_amplitude: f32,
) -> Transform {
    let mut t = point.at(eased);
    t.position.y += idle_float(elapsed, point.seed, float_amplitude, eased);
    let weight = outward_weight(eased);
    if weight > 0.0 {
        t.rotation = t.rotation.slerp(outward_orientation(t.position), weight);
    }
    t
}

/// Pose in front of the camera, expressed in the panel parent's space.
pub fn focus_target(camera: &CameraPose, parent: &Mat4) -> Transform {
    let world_pos = camera.position + camera.forward * FOCUS_DISTANCE - Vec3::Y * FOCUS_DROP;
    // look basis points away from the camera; the panel's front needs a half turn
    let world_rot = look_rotation(camera.forward, Vec3::Y) * Quat::from_rotation_y(PI);

    let (parent_scale, parent_rot, _) = parent.to_scale_rotation_translation();
    let scale = if parent_scale.x.abs() > f32::EPSILON {
        FOCUS_SCALE / parent_scale.x
    } else {
        FOCUS_SCALE
    };
    Transform::new(
        parent.inverse().transform_point3(world_pos),
        (parent_rot.inverse() * world_rot).normalize(),
        scale,
    )
}

/// Damped-approach factor for a frame of `dt` seconds.
///
/// Equals [`FOCUS_BLEND_PER_FRAME`] at the reference rate and stays
/// consistent across frame rates.
#[inline]
pub fn focus_blend(dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        return 0.0;
    }
    let frames = dt * FOCUS_REFERENCE_HZ;
    (1.0 - (1.0 - FOCUS_BLEND_PER_FRAME).powf(frames)).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
pub struct PanelDriver {
    points: Vec<MorphPoint>,
    current: Vec<Transform>,
    modes: Vec<PanelMode>,
    float_amplitude: f32,
}

impl PanelDriver {
    /// Panels start at their tree pose, matching the initial assembled state.
    pub fn new(points: Vec<MorphPoint>, float_amplitude: f32) -> Self {
        let current = points.iter().map(|p| p.tree).collect();
        let modes = vec![PanelMode::Morphing; points.len()];
        Self {
            points,
            current,
            modes,
            float_amplitude,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[MorphPoint] {
        &self.points
    }

    /// Current local transforms (parent space), one per panel.
    pub fn transforms(&self) -> &[Transform] {
        &self.current
    }

    pub fn mode(&self, index: usize) -> Option<PanelMode> {
        self.modes.get(index).copied()
    }

    /// The panel currently in the focus branch, if any.
    pub fn focused(&self) -> Option<usize> {
        self.modes.iter().position(|m| *m == PanelMode::Focused)
    }

    pub fn update(
        &mut self,
        state: &MorphState,
        elapsed: f32,
        dt: f32,
        camera: &CameraPose,
        parent: &Mat4,
    ) {
        let eased = ease_progress(clamp_progress(state.progress()));
        let blend = focus_blend(dt);
        for (i, point) in self.points.iter().enumerate() {
            let mode = resolve_mode(i, state);
            if self.modes[i] != mode {
                log::debug!("[panel] {} -> {:?}", i, mode);
                self.modes[i] = mode;
            }
            self.current[i] = match mode {
                PanelMode::Focused => {
                    let target = focus_target(camera, parent);
                    self.current[i].blend(&target, blend)
                }
                PanelMode::Morphing => {
                    morph_panel_transform(point, eased, elapsed, self.float_amplitude)
                }
            };
        }
    }
}
