//! Scene composition: builds every element set once, owns the morph state and
//! the drivers, and exposes plain rendering primitives to the host.
//!
//! The host supplies three collaborators: a [`TextureProvider`] at build time,
//! a [`CameraPose`] every frame, and a [`SceneRenderer`] that receives
//! (geometry, material, transforms) per batch and (transform, texture) per
//! panel. No morph logic lives outside the drivers.

use crate::camera::CameraPose;
use crate::config::{BatchConfig, ConeParams, SceneConfig};
use crate::constants::*;
use crate::curve::CatmullRomCurve;
use crate::error::ConfigError;
use crate::input::{apply_input, InputEvent, InputOutcome};
use crate::instanced::{InstanceBuffer, InstancedDriver};
use crate::mesh::{self, GeometryKind, MaterialDesc, MeshData};
use crate::panel::{PanelDriver, PanelMode};
use crate::sampler;
use crate::state::MorphState;
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Loads photo textures; the provider owns decoding failures and fallbacks.
pub trait TextureProvider {
    type Handle;

    /// One handle per path, in request order.
    fn load(&mut self, paths: &[String]) -> Vec<Self::Handle>;
}

pub struct BatchView<'a> {
    pub name: &'static str,
    pub geometry: GeometryKind,
    pub material: MaterialDesc,
    /// Scene root transform; instance transforms are relative to it.
    pub root: Mat4,
    pub instances: &'a InstanceBuffer,
}

pub struct PanelView<'a, T> {
    pub index: usize,
    /// World transform (root already applied).
    pub transform: Mat4,
    pub texture: Option<&'a T>,
    pub material: MaterialDesc,
    pub focused: bool,
}

pub trait SceneRenderer {
    type Texture;

    fn draw_batch(&mut self, batch: BatchView<'_>);
    fn draw_panel(&mut self, panel: PanelView<'_, Self::Texture>);
    /// Geometry that never morphs (the garland tube).
    fn draw_static(&mut self, geometry: GeometryKind, material: MaterialDesc, transform: Mat4);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the scene started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

#[derive(Clone, Debug)]
pub struct Batch {
    pub name: &'static str,
    pub geometry: GeometryKind,
    pub material: MaterialDesc,
    pub driver: InstancedDriver,
}

/// Uniform scale that keeps the composition inside narrow (portrait) viewports.
pub fn viewport_fit_scale(width: f32, height: f32) -> f32 {
    if !(width > 0.0 && height > 0.0) {
        return 1.0;
    }
    let aspect = width / height;
    if aspect >= FIT_REFERENCE_ASPECT {
        1.0
    } else {
        (aspect / FIT_REFERENCE_ASPECT).max(MIN_FIT_SCALE)
    }
}

fn instanced_batch(
    name: &'static str,
    geometry: GeometryKind,
    material: MaterialDesc,
    batch: &BatchConfig,
    cone: &ConeParams,
    float_amplitude: f32,
    rng: &mut StdRng,
) -> Batch {
    Batch {
        name,
        geometry,
        material,
        driver: InstancedDriver::new(
            sampler::build_morph_point_set(batch.count, &batch.points, cone, rng),
            float_amplitude,
        ),
    }
}

pub struct Scene<T> {
    config: SceneConfig,
    state: MorphState,
    batches: Vec<Batch>,
    panels: PanelDriver,
    textures: Vec<T>,
    garland: CatmullRomCurve,
    fit_scale: f32,
    root: Mat4,
    seen_revision: u64,
}

impl<T> Scene<T> {
    pub fn new<P>(config: SceneConfig, provider: &mut P) -> Result<Self, ConfigError>
    where
        P: TextureProvider<Handle = T> + ?Sized,
    {
        config.validate()?;
        let cone = config.cone;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let amplitude = config.idle_float_amplitude;
        let mut batches = vec![
            instanced_batch(
                "needles",
                GeometryKind::Needle,
                MaterialDesc::new(NEEDLE_COLOR, 0.0),
                &config.needles,
                &cone,
                amplitude,
                &mut rng,
            ),
            instanced_batch(
                "ornaments_primary",
                GeometryKind::Ornament,
                MaterialDesc::new(ORNAMENT_PRIMARY_COLOR, 0.15),
                &config.ornaments_primary,
                &cone,
                amplitude,
                &mut rng,
            ),
            instanced_batch(
                "ornaments_secondary",
                GeometryKind::Ornament,
                MaterialDesc::new(ORNAMENT_SECONDARY_COLOR, 0.25),
                &config.ornaments_secondary,
                &cone,
                amplitude,
                &mut rng,
            ),
        ];
        batches.push(Batch {
            name: "garland_beads",
            geometry: GeometryKind::Bead,
            material: MaterialDesc::new(GARLAND_COLOR, 0.6),
            driver: InstancedDriver::new(
                sampler::build_spiral_point_set(
                    &cone,
                    config.garland.bead_count,
                    config.garland.turns,
                ),
                amplitude,
            ),
        });

        let panels = PanelDriver::new(
            sampler::build_grid_panel_points(
                &cone,
                config.panels.count,
                config.panels.scatter_radius,
                &mut rng,
            ),
            config.panel_idle_float_amplitude,
        );

        let paths = config.photo_paths();
        let textures = provider.load(&paths);
        if textures.len() != paths.len() {
            log::warn!(
                "[scene] texture provider returned {} handles for {} panels",
                textures.len(),
                paths.len()
            );
        }

        let garland = sampler::build_spiral_curve(
            &cone,
            config.garland.turns,
            config.garland.curve_samples,
        );

        log::info!(
            "[scene] built needles={} ornaments={}+{} beads={} panels={} seed={}",
            config.needles.count,
            config.ornaments_primary.count,
            config.ornaments_secondary.count,
            config.garland.bead_count,
            config.panels.count,
            config.seed
        );

        let state = MorphState::new();
        let seen_revision = state.revision();
        let mut scene = Self {
            config,
            state,
            batches,
            panels,
            textures,
            garland,
            fit_scale: 1.0,
            root: Mat4::IDENTITY,
            seen_revision,
        };
        scene.set_fit_scale(1.0);
        Ok(scene)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> &MorphState {
        &self.state
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn panels(&self) -> &PanelDriver {
        &self.panels
    }

    pub fn textures(&self) -> &[T] {
        &self.textures
    }

    pub fn garland(&self) -> &CatmullRomCurve {
        &self.garland
    }

    pub fn fit_scale(&self) -> f32 {
        self.fit_scale
    }

    /// Parent transform of every element.
    pub fn root(&self) -> Mat4 {
        self.root
    }

    /// Route one logical input event through the interaction rules.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputOutcome {
        let outcome = apply_input(&mut self.state, event, self.panels.len());
        match outcome {
            InputOutcome::Ignored => {}
            InputOutcome::ProgressChanged => log::debug!(
                "[input] progress={:.3} mode={:?}",
                self.state.progress(),
                self.state.mode()
            ),
            _ => log::info!("[input] {:?} -> {:?}", event, outcome),
        }
        outcome
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_fit_scale(viewport_fit_scale(width, height));
    }

    fn set_fit_scale(&mut self, scale: f32) {
        self.fit_scale = scale;
        self.root = Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, ROOT_Y_OFFSET, 0.0),
        );
    }

    /// Advance every driver to the current state.
    pub fn update(&mut self, time: FrameTime, camera: &CameraPose) {
        if self.state.revision() != self.seen_revision {
            self.seen_revision = self.state.revision();
            log::debug!(
                "[state] rev={} mode={:?} progress={:.3} selected={:?}",
                self.seen_revision,
                self.state.mode(),
                self.state.progress(),
                self.state.selected_panel()
            );
        }
        let progress = self.state.progress();
        for batch in &mut self.batches {
            batch.driver.update(progress, time.elapsed);
        }
        self.panels
            .update(&self.state, time.elapsed, time.dt, camera, &self.root);
    }

    pub fn draw<R>(&self, renderer: &mut R)
    where
        R: SceneRenderer<Texture = T> + ?Sized,
    {
        renderer.draw_static(
            GeometryKind::Garland,
            MaterialDesc::new(GARLAND_COLOR, 0.4),
            self.root,
        );
        for batch in &self.batches {
            if batch.driver.is_empty() {
                continue;
            }
            renderer.draw_batch(BatchView {
                name: batch.name,
                geometry: batch.geometry,
                material: batch.material,
                root: self.root,
                instances: batch.driver.buffer(),
            });
        }
        for (index, transform) in self.panels.transforms().iter().enumerate() {
            renderer.draw_panel(PanelView {
                index,
                transform: self.root * transform.to_matrix(),
                texture: self.textures.get(index),
                material: MaterialDesc::new(PANEL_FRAME_COLOR, 0.0),
                focused: self.panels.mode(index) == Some(PanelMode::Focused),
            });
        }
    }

    /// World transforms of every panel, for ray picking.
    pub fn panel_world_transforms(&self) -> Vec<Mat4> {
        self.panels
            .transforms()
            .iter()
            .map(|t| self.root * t.to_matrix())
            .collect()
    }

    /// Half width/height of a panel in its local space.
    pub fn panel_half_extents(&self) -> Vec2 {
        Vec2::new(PANEL_WIDTH * 0.5, PANEL_HEIGHT * 0.5)
    }

    /// Mesh for one of the scene's geometry descriptors.
    pub fn mesh(&self, geometry: GeometryKind) -> MeshData {
        match geometry {
            GeometryKind::Needle => mesh::cuboid(Vec3::new(0.03, 0.03, 0.2)),
            GeometryKind::Ornament => mesh::uv_sphere(1.0, 18, 12),
            GeometryKind::Bead => mesh::uv_sphere(1.0, 8, 6),
            GeometryKind::Panel => mesh::panel_quad(PANEL_WIDTH, PANEL_HEIGHT),
            GeometryKind::Garland => mesh::tube(
                &self.garland,
                (self.config.garland.curve_samples as u32) * 3,
                self.config.garland.tube_radius,
                6,
            ),
        }
    }
}
