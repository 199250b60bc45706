//! Structured scene parameters.
//!
//! Tuning values default to the constants in [`crate::constants`]; counts are
//! parameters, not structural constants, so any of them may be changed (or
//! set to zero) before building a [`crate::Scene`].

use crate::constants::*;
use crate::error::ConfigError;

/// Frustum (cone with a flat top) used as the assembled silhouette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeParams {
    pub height: f32,
    pub radius_base: f32,
    pub radius_top: f32,
    pub y_base: f32,
}

impl ConeParams {
    pub fn new(height: f32, radius_base: f32, radius_top: f32, y_base: f32) -> Self {
        Self {
            height,
            radius_base,
            radius_top,
            y_base,
        }
    }

    #[inline]
    pub fn y_top(&self) -> f32 {
        self.y_base + self.height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::ConeHeight(self.height));
        }
        let radius_ok = |r: f32| r.is_finite() && r >= 0.0;
        if !radius_ok(self.radius_base) || !radius_ok(self.radius_top) {
            return Err(ConfigError::ConeRadius {
                base: self.radius_base,
                top: self.radius_top,
            });
        }
        Ok(())
    }
}

impl Default for ConeParams {
    fn default() -> Self {
        Self::new(TREE_HEIGHT, TREE_RADIUS_BASE, TREE_RADIUS_TOP, TREE_Y_BASE)
    }
}

/// Sampling parameters for one procedurally placed batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSetConfig {
    pub scatter_radius: f32,
    /// < 1 pushes tree positions toward the frustum's outer shell.
    pub surface_bias: f32,
    /// > 1 weights tree positions toward the base.
    pub height_bias: f32,
    /// Extra radial push applied to tree positions (ornament rings).
    pub radial_offset: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl PointSetConfig {
    pub fn needles() -> Self {
        Self {
            scatter_radius: SCATTER_RADIUS,
            surface_bias: NEEDLE_SURFACE_BIAS,
            height_bias: NEEDLE_HEIGHT_BIAS,
            radial_offset: 0.0,
            scale_min: NEEDLE_SCALE_MIN,
            scale_max: NEEDLE_SCALE_MAX,
        }
    }

    pub fn ornaments() -> Self {
        Self {
            scatter_radius: SCATTER_RADIUS,
            surface_bias: ORNAMENT_SURFACE_BIAS,
            height_bias: ORNAMENT_HEIGHT_BIAS,
            radial_offset: ORNAMENT_RADIAL_OFFSET,
            scale_min: ORNAMENT_SCALE_MIN,
            scale_max: ORNAMENT_SCALE_MAX,
        }
    }

    fn validate(&self, set: &'static str) -> Result<(), ConfigError> {
        positive(set, "scatter_radius", self.scatter_radius)?;
        positive(set, "surface_bias", self.surface_bias)?;
        positive(set, "height_bias", self.height_bias)?;
        positive(set, "scale_min", self.scale_min)?;
        positive(set, "scale_max", self.scale_max)?;
        if !self.radial_offset.is_finite() {
            return Err(ConfigError::NonPositive {
                set,
                name: "radial_offset",
                value: self.radial_offset,
            });
        }
        if self.scale_min > self.scale_max {
            return Err(ConfigError::ScaleRange {
                set,
                min: self.scale_min,
                max: self.scale_max,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchConfig {
    pub count: usize,
    pub points: PointSetConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GarlandConfig {
    pub bead_count: usize,
    pub turns: f32,
    pub curve_samples: usize,
    pub tube_radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
    pub count: usize,
    pub scatter_radius: f32,
    /// Path pattern with an `{index}` placeholder, filled 1-based.
    pub photo_pattern: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub cone: ConeParams,
    /// Seeds the `StdRng` driving every random placement.
    pub seed: u64,
    pub needles: BatchConfig,
    pub ornaments_primary: BatchConfig,
    pub ornaments_secondary: BatchConfig,
    pub garland: GarlandConfig,
    pub panels: PanelConfig,
    pub idle_float_amplitude: f32,
    pub panel_idle_float_amplitude: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cone: ConeParams::default(),
            seed: 42,
            needles: BatchConfig {
                count: NEEDLE_COUNT,
                points: PointSetConfig::needles(),
            },
            ornaments_primary: BatchConfig {
                count: ORNAMENT_PRIMARY_COUNT,
                points: PointSetConfig::ornaments(),
            },
            ornaments_secondary: BatchConfig {
                count: ORNAMENT_SECONDARY_COUNT,
                points: PointSetConfig::ornaments(),
            },
            garland: GarlandConfig {
                bead_count: GARLAND_BEAD_COUNT,
                turns: GARLAND_TURNS,
                curve_samples: GARLAND_CURVE_SAMPLES,
                tube_radius: GARLAND_TUBE_RADIUS,
            },
            panels: PanelConfig {
                count: PANEL_COUNT,
                scatter_radius: PANEL_SCATTER_RADIUS,
                photo_pattern: PHOTO_PATH_PATTERN.to_string(),
            },
            idle_float_amplitude: IDLE_FLOAT_AMPLITUDE,
            panel_idle_float_amplitude: PANEL_IDLE_FLOAT_AMPLITUDE,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cone.validate()?;
        self.needles.points.validate("needles")?;
        self.ornaments_primary.points.validate("ornaments_primary")?;
        self.ornaments_secondary
            .points
            .validate("ornaments_secondary")?;
        positive("garland", "turns", self.garland.turns)?;
        positive("garland", "tube_radius", self.garland.tube_radius)?;
        if self.garland.curve_samples < 2 {
            return Err(ConfigError::CurveSamples(self.garland.curve_samples));
        }
        positive("panels", "scatter_radius", self.panels.scatter_radius)?;
        if !self.panels.photo_pattern.contains("{index}") {
            return Err(ConfigError::PhotoPattern(self.panels.photo_pattern.clone()));
        }
        Ok(())
    }

    /// Photo paths requested from the texture provider, one per panel, in panel order.
    pub fn photo_paths(&self) -> Vec<String> {
        (0..self.panels.count)
            .map(|i| {
                self.panels
                    .photo_pattern
                    .replace("{index}", &(i + 1).to_string())
            })
            .collect()
    }
}

fn positive(set: &'static str, name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { set, name, value })
    }
}
