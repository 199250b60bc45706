//! Logical input events, the interaction rules applied to the morph state, and
//! ray-picking helpers frontends use to find the panel under the pointer.

use crate::constants::WHEEL_SENSITIVITY;
use crate::morph::clamp_progress;
use crate::state::{MorphMode, MorphState};
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Key name as reported by the host (`" "` for the spacebar).
    KeyDown(String),
    /// Wheel delta in pixels, positive = scrolling down.
    Wheel { delta_y: f32 },
    /// Pointer pressed over a panel (`Some(index)`) or over the background.
    PointerDown { panel: Option<usize> },
}

/// What an event did to the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Toggled,
    ProgressChanged,
    Selected(usize),
    SelectionCleared,
    Ignored,
}

#[inline]
pub fn is_toggle_key(key: &str) -> bool {
    matches!(key, " " | "Space" | "Spacebar")
}

/// New raw progress after a wheel step; scrolling up (negative delta) assembles.
#[inline]
pub fn wheel_progress(progress: f32, delta_y: f32) -> f32 {
    clamp_progress(progress - delta_y * WHEEL_SENSITIVITY)
}

pub fn apply_input(state: &mut MorphState, event: &InputEvent, panel_count: usize) -> InputOutcome {
    match event {
        InputEvent::KeyDown(key) if is_toggle_key(key) => {
            state.toggle();
            InputOutcome::Toggled
        }
        InputEvent::KeyDown(_) => InputOutcome::Ignored,
        InputEvent::Wheel { delta_y } => {
            if !delta_y.is_finite() || *delta_y == 0.0 {
                return InputOutcome::Ignored;
            }
            let progress = wheel_progress(state.progress(), *delta_y);
            state.set_progress(progress);
            let mode = MorphMode::classify(progress);
            if state.mode() != mode {
                state.set_mode(mode);
            }
            InputOutcome::ProgressChanged
        }
        // a panel hit never reaches the background handler, even when selection is gated off
        InputEvent::PointerDown { panel: Some(i) } if *i < panel_count => {
            if state.mode() == MorphMode::Scattered {
                state.select_panel(*i);
                InputOutcome::Selected(*i)
            } else {
                InputOutcome::Ignored
            }
        }
        InputEvent::PointerDown { .. } => {
            if state.selected_panel().is_some() {
                state.clear_selection();
                InputOutcome::SelectionCleared
            } else {
                InputOutcome::Ignored
            }
        }
    }
}

/// Distance along the ray to the sphere, or `None` on a miss or when it lies behind the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Hit distance against a panel quad centred on its local origin in the local
/// XY plane, `half_extents` in local units.
pub fn ray_panel(ray_origin: Vec3, ray_dir: Vec3, world: &Mat4, half_extents: Vec2) -> Option<f32> {
    let inv = world.inverse();
    let lo = inv.transform_point3(ray_origin);
    let ld = inv.transform_vector3(ray_dir);
    if ld.z.abs() < 1e-6 {
        return None;
    }
    let t = -lo.z / ld.z;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let hit = lo + ld * t;
    (hit.x.abs() <= half_extents.x && hit.y.abs() <= half_extents.y).then_some(t)
}

/// Nearest panel under the ray.
pub fn pick_panel(
    ray_origin: Vec3,
    ray_dir: Vec3,
    panels: &[Mat4],
    half_extents: Vec2,
) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, world) in panels.iter().enumerate() {
        let center = world.transform_point3(Vec3::ZERO);
        let radius = half_extents.length() * world.x_axis.truncate().length();
        let inside = (ray_origin - center).length() <= radius;
        if !inside && ray_sphere(ray_origin, ray_dir, center, radius).is_none() {
            continue;
        }
        if let Some(t) = ray_panel(ray_origin, ray_dir, world, half_extents) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
