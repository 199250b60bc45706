// Host-side tests for scene composition, configuration, meshes and the camera.

use glam::{Mat4, Vec3};
use tree_core::constants::*;
use tree_core::*;

/// Hands out the request index as the texture handle and records the paths.
#[derive(Default)]
struct RecordingProvider {
    requested: Vec<String>,
}

impl TextureProvider for RecordingProvider {
    type Handle = usize;

    fn load(&mut self, paths: &[String]) -> Vec<usize> {
        self.requested.extend_from_slice(paths);
        (0..paths.len()).collect()
    }
}

#[derive(Default)]
struct CountingRenderer {
    batches: Vec<(&'static str, GeometryKind, usize)>,
    panels: Vec<(usize, Option<usize>, bool)>,
    statics: Vec<GeometryKind>,
}

impl SceneRenderer for CountingRenderer {
    type Texture = usize;

    fn draw_batch(&mut self, batch: BatchView<'_>) {
        self.batches
            .push((batch.name, batch.geometry, batch.instances.len()));
    }

    fn draw_panel(&mut self, panel: PanelView<'_, usize>) {
        self.panels
            .push((panel.index, panel.texture.copied(), panel.focused));
    }

    fn draw_static(&mut self, geometry: GeometryKind, _material: MaterialDesc, _transform: Mat4) {
        self.statics.push(geometry);
    }
}

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.needles.count = 120;
    config.ornaments_primary.count = 10;
    config.ornaments_secondary.count = 6;
    config.garland.bead_count = 20;
    config.garland.curve_samples = 40;
    config
}

fn build(config: SceneConfig) -> (Scene<usize>, RecordingProvider) {
    let mut provider = RecordingProvider::default();
    let scene = Scene::new(config, &mut provider).expect("valid config");
    (scene, provider)
}

fn frame(i: u32) -> FrameTime {
    FrameTime {
        elapsed: i as f32 / 60.0,
        dt: 1.0 / 60.0,
    }
}

#[test]
fn default_scene_builds_every_element_set() {
    let (scene, provider) = build(SceneConfig::default());
    let counts: Vec<usize> = scene.batches().iter().map(|b| b.driver.len()).collect();
    assert_eq!(
        counts,
        vec![
            NEEDLE_COUNT,
            ORNAMENT_PRIMARY_COUNT,
            ORNAMENT_SECONDARY_COUNT,
            GARLAND_BEAD_COUNT
        ]
    );
    assert_eq!(scene.panels().len(), PANEL_COUNT);
    assert_eq!(scene.textures().len(), PANEL_COUNT);
    assert_eq!(provider.requested.len(), PANEL_COUNT);
    assert_eq!(scene.state(), &MorphState::default());
}

#[test]
fn photos_are_requested_one_based_in_panel_order() {
    let (_, provider) = build(small_config());
    assert_eq!(provider.requested[0], "photos/1.jpg");
    assert_eq!(provider.requested[24], "photos/25.jpg");
}

#[test]
fn same_seed_builds_identical_scenes() {
    let (a, _) = build(small_config());
    let (b, _) = build(small_config());
    for (x, y) in a.batches().iter().zip(b.batches()) {
        assert_eq!(x.driver.points(), y.driver.points());
    }
    assert_eq!(a.panels().points(), b.panels().points());

    let mut other = small_config();
    other.seed = 7;
    let (c, _) = build(other);
    assert_ne!(a.batches()[0].driver.points(), c.batches()[0].driver.points());
}

#[test]
fn zero_counts_build_an_empty_scene() {
    let mut config = small_config();
    config.needles.count = 0;
    config.ornaments_primary.count = 0;
    config.ornaments_secondary.count = 0;
    config.garland.bead_count = 0;
    config.panels.count = 0;
    let (mut scene, provider) = build(config);
    assert!(provider.requested.is_empty());
    scene.update(frame(1), &Camera::looking_at_tree(1.0).pose());

    let mut renderer = CountingRenderer::default();
    scene.draw(&mut renderer);
    assert!(renderer.batches.is_empty());
    assert!(renderer.panels.is_empty());
    assert_eq!(renderer.statics, vec![GeometryKind::Garland]);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = small_config();
    config.cone.height = 0.0;
    let mut provider = RecordingProvider::default();
    assert_eq!(
        Scene::new(config, &mut provider).err(),
        Some(ConfigError::ConeHeight(0.0))
    );
    assert!(provider.requested.is_empty());
}

#[test]
fn unbounded_scale_is_rejected_before_sampling() {
    let mut config = small_config();
    config.ornaments_primary.points.scale_max = f32::INFINITY;
    let mut provider = RecordingProvider::default();
    assert!(matches!(
        Scene::new(config, &mut provider),
        Err(ConfigError::NonPositive {
            name: "scale_max",
            ..
        })
    ));
}

#[test]
fn config_validation_covers_each_section() {
    assert!(SceneConfig::default().validate().is_ok());

    let mut config = SceneConfig::default();
    config.cone.radius_top = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::ConeRadius { .. })));

    let mut config = SceneConfig::default();
    config.needles.points.scale_min = 2.0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::ScaleRange {
            set: "needles",
            min: 2.0,
            max: NEEDLE_SCALE_MAX
        })
    );

    let mut config = SceneConfig::default();
    config.ornaments_secondary.points.surface_bias = f32::NAN;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive {
            set: "ornaments_secondary",
            name: "surface_bias",
            ..
        })
    ));

    for bad in [f32::NAN, f32::INFINITY] {
        let mut config = SceneConfig::default();
        config.needles.points.scale_max = bad;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                set: "needles",
                name: "scale_max",
                ..
            })
        ));
    }

    let mut config = SceneConfig::default();
    config.garland.curve_samples = 1;
    assert_eq!(config.validate(), Err(ConfigError::CurveSamples(1)));

    let mut config = SceneConfig::default();
    config.panels.photo_pattern = "photos/cover.jpg".into();
    assert!(matches!(config.validate(), Err(ConfigError::PhotoPattern(_))));
}

#[test]
fn config_errors_describe_the_problem() {
    let msg = ConfigError::CurveSamples(1).to_string();
    assert!(msg.contains("at least 2"));
    let msg = ConfigError::PhotoPattern("x.jpg".into()).to_string();
    assert!(msg.contains("{index}"));
}

#[test]
fn draw_hands_every_batch_and_panel_to_the_renderer() {
    let (mut scene, _) = build(small_config());
    scene.update(frame(1), &Camera::looking_at_tree(1.0).pose());
    let mut renderer = CountingRenderer::default();
    scene.draw(&mut renderer);

    assert_eq!(renderer.statics, vec![GeometryKind::Garland]);
    assert_eq!(
        renderer.batches,
        vec![
            ("needles", GeometryKind::Needle, 120),
            ("ornaments_primary", GeometryKind::Ornament, 10),
            ("ornaments_secondary", GeometryKind::Ornament, 6),
            ("garland_beads", GeometryKind::Bead, 20),
        ]
    );
    assert_eq!(renderer.panels.len(), PANEL_COUNT);
    for (i, (index, texture, focused)) in renderer.panels.iter().enumerate() {
        assert_eq!(*index, i);
        assert_eq!(*texture, Some(i));
        assert!(!focused);
    }
}

#[test]
fn input_drives_the_scene_state() {
    let (mut scene, _) = build(small_config());
    let camera = Camera::looking_at_tree(1.0).pose();

    assert_eq!(
        scene.handle_input(&InputEvent::KeyDown(" ".into())),
        InputOutcome::Toggled
    );
    assert_eq!(scene.state().mode(), MorphMode::Scattered);
    assert_eq!(
        scene.handle_input(&InputEvent::PointerDown { panel: Some(3) }),
        InputOutcome::Selected(3)
    );
    scene.update(frame(1), &camera);
    assert_eq!(scene.panels().focused(), Some(3));

    let mut renderer = CountingRenderer::default();
    scene.draw(&mut renderer);
    assert!(renderer.panels[3].2);

    scene.handle_input(&InputEvent::PointerDown { panel: None });
    scene.update(frame(2), &camera);
    assert_eq!(scene.panels().focused(), None);
}

#[test]
fn scattered_scene_places_batches_at_scatter_positions() {
    let (mut scene, _) = build(small_config());
    scene.handle_input(&InputEvent::Wheel { delta_y: 2000.0 });
    assert_eq!(scene.state().progress(), 0.0);
    scene.update(FrameTime::default(), &Camera::looking_at_tree(1.0).pose());
    let batch = &scene.batches()[0];
    for (m, p) in batch.driver.buffer().as_slice().iter().zip(batch.driver.points()) {
        let offset = idle_float(0.0, p.seed, IDLE_FLOAT_AMPLITUDE, 0.0);
        let expected = p.scatter.position + Vec3::Y * offset;
        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(expected, 1e-4));
    }
}

#[test]
fn viewport_fit_scale_shrinks_portrait_only() {
    assert_eq!(viewport_fit_scale(1920.0, 1080.0), 1.0);
    assert_eq!(viewport_fit_scale(1000.0, 1000.0), 1.0);
    assert!((viewport_fit_scale(500.0, 1000.0) - 0.5).abs() < 1e-6);
    assert!((viewport_fit_scale(100.0, 1000.0) - MIN_FIT_SCALE).abs() < 1e-6);
    assert_eq!(viewport_fit_scale(0.0, 0.0), 1.0);
}

#[test]
fn resize_updates_the_root_transform() {
    let (mut scene, _) = build(small_config());
    assert_eq!(scene.root(), Mat4::IDENTITY);
    scene.resize(600.0, 1000.0);
    assert!((scene.fit_scale() - 0.6).abs() < 1e-6);
    let p = scene.root().transform_point3(Vec3::ONE);
    assert!(p.abs_diff_eq(Vec3::splat(0.6), 1e-5));

    // panel world transforms carry the root scale
    scene.update(frame(1), &Camera::looking_at_tree(0.6).pose());
    let world = scene.panel_world_transforms();
    let local = scene.panels().transforms()[0].to_matrix();
    assert!(world[0].abs_diff_eq(scene.root() * local, 1e-5));
}

#[test]
fn focused_panel_lands_in_front_of_the_camera_after_resize() {
    let (mut scene, _) = build(small_config());
    scene.resize(500.0, 1000.0);
    let camera = Camera::looking_at_tree(0.5);
    let pose = camera.pose();
    scene.handle_input(&InputEvent::KeyDown("Space".into()));
    scene.handle_input(&InputEvent::PointerDown { panel: Some(0) });
    for i in 0..300 {
        scene.update(frame(i), &pose);
    }
    let world = scene.panel_world_transforms()[0];
    let expected = pose.position + pose.forward * FOCUS_DISTANCE - Vec3::Y * FOCUS_DROP;
    assert!(world.transform_point3(Vec3::ZERO).abs_diff_eq(expected, 1e-3));
    let world_scale = world.x_axis.truncate().length();
    assert!((world_scale - FOCUS_SCALE).abs() < 1e-3);
}

#[test]
fn picking_through_the_screen_centre_finds_the_focused_panel() {
    let (mut scene, _) = build(small_config());
    let camera = Camera::looking_at_tree(1.0);
    let pose = camera.pose();
    scene.handle_input(&InputEvent::KeyDown(" ".into()));
    scene.handle_input(&InputEvent::PointerDown { panel: Some(5) });
    for i in 0..300 {
        scene.update(frame(i), &pose);
    }
    // the panel sits FOCUS_DROP below the eye line; aim at its centre
    let centre = scene.panel_world_transforms()[5].transform_point3(Vec3::ZERO);
    let dir = (centre - camera.eye).normalize();
    let hit = pick_panel(
        camera.eye,
        dir,
        &scene.panel_world_transforms(),
        scene.panel_half_extents(),
    );
    assert_eq!(hit, Some(5));
}

#[test]
fn scene_meshes_have_valid_indices() {
    let (scene, _) = build(small_config());
    for kind in [
        GeometryKind::Needle,
        GeometryKind::Ornament,
        GeometryKind::Bead,
        GeometryKind::Panel,
        GeometryKind::Garland,
    ] {
        let mesh = scene.mesh(kind);
        assert!(!mesh.indices.is_empty(), "{kind:?}");
        assert_eq!(mesh.indices.len() % 3, 0, "{kind:?}");
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n), "{kind:?}");
        for v in &mesh.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "{kind:?} normal {len}");
        }
    }
}

#[test]
fn mesh_builders_produce_expected_sizes() {
    let quad = mesh::panel_quad(PANEL_WIDTH, PANEL_HEIGHT);
    assert_eq!(quad.triangle_count(), 2);
    assert_eq!(quad.vertices[3].uv, [0.0, 0.0]);
    assert_eq!(quad.vertices[3].position, [-PANEL_WIDTH * 0.5, PANEL_HEIGHT * 0.5, 0.0]);

    let cube = mesh::cuboid(Vec3::new(0.1, 0.2, 0.3));
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.triangle_count(), 12);
    assert!(cube
        .vertices
        .iter()
        .all(|v| v.position[0].abs() <= 0.1 + 1e-6 && v.position[2].abs() <= 0.3 + 1e-6));

    let sphere = mesh::uv_sphere(1.0, 8, 6);
    assert_eq!(sphere.vertices.len(), 9 * 7);
    assert_eq!(sphere.triangle_count(), 8 * 6 * 2);

    let curve = build_spiral_curve(&ConeParams::default(), 2.0, 30);
    let tube = mesh::tube(&curve, 60, 0.05, 6);
    assert_eq!(tube.vertices.len(), 61 * 7);
    assert_eq!(tube.triangle_count(), 60 * 6 * 2);
    for (i, v) in tube.vertices.iter().enumerate() {
        let u = (i / 7) as f32 / 60.0;
        let d = Vec3::from(v.position).distance(curve.point_at(u));
        assert!((d - 0.05).abs() < 1e-3);
    }
}

#[test]
fn camera_centre_ray_follows_forward() {
    let camera = Camera::looking_at_tree(16.0 / 9.0);
    let (origin, dir) = camera.screen_ray(960.0, 540.0, 1920.0, 1080.0);
    assert!(origin.abs_diff_eq(Vec3::from(CAMERA_EYE), 1e-6));
    assert!(dir.abs_diff_eq(camera.forward(), 1e-3));
    let pose = camera.pose();
    assert!((pose.forward.length() - 1.0).abs() < 1e-5);
}

#[test]
fn camera_pose_normalises_forward() {
    let pose = CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
    assert!(pose.forward.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    let degenerate = CameraPose::new(Vec3::ZERO, Vec3::ZERO);
    assert_eq!(degenerate.forward, Vec3::NEG_Z);
}
