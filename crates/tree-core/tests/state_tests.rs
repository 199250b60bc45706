// Host-side tests for the morph state store and the interaction rules.

use glam::{Mat4, Quat, Vec2, Vec3};
use tree_core::*;

fn scattered() -> MorphState {
    let mut state = MorphState::new();
    state.toggle();
    state
}

#[test]
fn starts_assembled_with_nothing_selected() {
    let state = MorphState::default();
    assert_eq!(state.mode(), MorphMode::TreeShape);
    assert_eq!(state.progress(), 1.0);
    assert_eq!(state.selected_panel(), None);
}

#[test]
fn double_toggle_round_trips() {
    let mut state = MorphState::new();
    state.toggle();
    assert_eq!(state.mode(), MorphMode::Scattered);
    assert_eq!(state.progress(), 0.0);
    state.toggle();
    assert_eq!(state.mode(), MorphMode::TreeShape);
    assert_eq!(state.progress(), 1.0);
}

#[test]
fn toggle_snaps_from_partial_progress() {
    let mut state = MorphState::new();
    state.set_progress(0.62);
    state.toggle();
    assert_eq!(state.mode(), MorphMode::Scattered);
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn set_progress_clamps() {
    let mut state = MorphState::new();
    state.set_progress(1.7);
    assert_eq!(state.progress(), 1.0);
    state.set_progress(-0.4);
    assert_eq!(state.progress(), 0.0);
    state.set_progress(f32::NAN);
    assert_eq!(state.progress(), 0.0);
}

#[test]
fn set_mode_is_independent_of_progress() {
    let mut state = MorphState::new();
    state.set_mode(MorphMode::Scattered);
    assert_eq!(state.mode(), MorphMode::Scattered);
    assert_eq!(state.progress(), 1.0);
}

#[test]
fn classify_splits_at_one_half() {
    assert_eq!(MorphMode::classify(0.3), MorphMode::Scattered);
    assert_eq!(MorphMode::classify(0.5), MorphMode::Scattered);
    assert_eq!(MorphMode::classify(0.7), MorphMode::TreeShape);
}

#[test]
fn every_mutation_bumps_revision() {
    let mut state = MorphState::new();
    let r0 = state.revision();
    state.toggle();
    state.set_progress(0.2);
    state.set_mode(MorphMode::TreeShape);
    state.select_panel(1);
    state.clear_selection();
    assert_eq!(state.revision(), r0 + 5);
}

#[test]
fn space_toggles() {
    let mut state = MorphState::new();
    assert_eq!(
        apply_input(&mut state, &InputEvent::KeyDown(" ".into()), 25),
        InputOutcome::Toggled
    );
    assert_eq!(state.mode(), MorphMode::Scattered);
    assert_eq!(
        apply_input(&mut state, &InputEvent::KeyDown("Space".into()), 25),
        InputOutcome::Toggled
    );
    assert_eq!(state.mode(), MorphMode::TreeShape);
    assert_eq!(
        apply_input(&mut state, &InputEvent::KeyDown("a".into()), 25),
        InputOutcome::Ignored
    );
}

#[test]
fn wheel_progress_sets_mode_from_threshold() {
    let mut state = scattered();
    // 0.3 / 0.0012 pixels of upward scrolling
    apply_input(&mut state, &InputEvent::Wheel { delta_y: -250.0 }, 25);
    assert!((state.progress() - 0.3).abs() < 1e-4);
    assert_eq!(state.mode(), MorphMode::Scattered);

    apply_input(&mut state, &InputEvent::Wheel { delta_y: -(0.4 / 0.0012) }, 25);
    assert!((state.progress() - 0.7).abs() < 1e-4);
    assert_eq!(state.mode(), MorphMode::TreeShape);
}

#[test]
fn wheel_down_scatters_and_clamps() {
    let mut state = MorphState::new();
    let outcome = apply_input(&mut state, &InputEvent::Wheel { delta_y: 5000.0 }, 25);
    assert_eq!(outcome, InputOutcome::ProgressChanged);
    assert_eq!(state.progress(), 0.0);
    assert_eq!(state.mode(), MorphMode::Scattered);
    assert_eq!(wheel_progress(1.0, -100.0), 1.0);
}

#[test]
fn zero_or_invalid_wheel_is_ignored() {
    let mut state = MorphState::new();
    let rev = state.revision();
    assert_eq!(
        apply_input(&mut state, &InputEvent::Wheel { delta_y: 0.0 }, 25),
        InputOutcome::Ignored
    );
    assert_eq!(
        apply_input(&mut state, &InputEvent::Wheel { delta_y: f32::NAN }, 25),
        InputOutcome::Ignored
    );
    assert_eq!(state.revision(), rev);
}

#[test]
fn selecting_while_scattered_then_background_clears() {
    let mut state = scattered();
    let outcome = apply_input(&mut state, &InputEvent::PointerDown { panel: Some(3) }, 25);
    assert_eq!(outcome, InputOutcome::Selected(3));
    assert_eq!(state.selected_panel(), Some(3));

    let outcome = apply_input(&mut state, &InputEvent::PointerDown { panel: None }, 25);
    assert_eq!(outcome, InputOutcome::SelectionCleared);
    assert_eq!(state.selected_panel(), None);
}

#[test]
fn selecting_while_assembled_is_a_no_op() {
    let mut state = MorphState::new();
    let outcome = apply_input(&mut state, &InputEvent::PointerDown { panel: Some(3) }, 25);
    assert_eq!(outcome, InputOutcome::Ignored);
    assert_eq!(state.selected_panel(), None);
}

#[test]
fn panel_click_while_assembled_keeps_existing_selection() {
    let mut state = scattered();
    state.select_panel(2);
    state.set_mode(MorphMode::TreeShape);
    apply_input(&mut state, &InputEvent::PointerDown { panel: Some(4) }, 25);
    assert_eq!(state.selected_panel(), Some(2));
}

#[test]
fn out_of_range_panel_is_treated_as_background() {
    let mut state = scattered();
    state.select_panel(1);
    let outcome = apply_input(&mut state, &InputEvent::PointerDown { panel: Some(40) }, 25);
    assert_eq!(outcome, InputOutcome::SelectionCleared);
    assert_eq!(state.selected_panel(), None);
}

#[test]
fn ray_sphere_hits_front_surface() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!((t.unwrap() - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    // sphere behind the origin
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
}

#[test]
fn ray_panel_respects_extents() {
    let half = Vec2::new(0.45, 0.54);
    let world = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    let t = ray_panel(Vec3::ZERO, Vec3::NEG_Z, &world, half);
    assert!((t.unwrap() - 5.0).abs() < 1e-5);

    let off = Mat4::from_translation(Vec3::new(1.0, 0.0, -5.0));
    assert!(ray_panel(Vec3::ZERO, Vec3::NEG_Z, &off, half).is_none());

    // edge-on panels cannot be hit
    let edge_on = Mat4::from_rotation_translation(
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Vec3::new(0.0, 0.0, -5.0),
    );
    assert!(ray_panel(Vec3::ZERO, Vec3::NEG_Z, &edge_on, half).is_none());
}

#[test]
fn pick_panel_returns_the_nearest_hit() {
    let half = Vec2::new(0.45, 0.54);
    let panels = [
        Mat4::from_translation(Vec3::new(0.0, 0.0, -9.0)),
        Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)),
        Mat4::from_translation(Vec3::new(3.0, 0.0, -2.0)),
    ];
    assert_eq!(pick_panel(Vec3::ZERO, Vec3::NEG_Z, &panels, half), Some(1));
    assert_eq!(pick_panel(Vec3::ZERO, Vec3::Z, &panels, half), None);
}

#[test]
fn pick_panel_accounts_for_panel_scale() {
    let half = Vec2::new(0.45, 0.54);
    let scaled = Mat4::from_scale_rotation_translation(
        Vec3::splat(2.2),
        Quat::IDENTITY,
        Vec3::new(0.8, 0.0, -4.0),
    );
    assert_eq!(pick_panel(Vec3::ZERO, Vec3::NEG_Z, &[scaled], half), Some(0));
}
