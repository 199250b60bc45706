use thiserror::Error;

/// Rejected scene configuration.
///
/// Everything past construction is infallible: the per-frame drivers clamp
/// and fall back instead of returning errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("cone height must be positive and finite, got {0}")]
    ConeHeight(f32),
    #[error("cone radii must be non-negative and finite, got base={base} top={top}")]
    ConeRadius { base: f32, top: f32 },
    #[error("{set}: {name} must be positive and finite, got {value}")]
    NonPositive {
        set: &'static str,
        name: &'static str,
        value: f32,
    },
    #[error("{set}: scale range is inverted ({min} > {max})")]
    ScaleRange {
        set: &'static str,
        min: f32,
        max: f32,
    },
    #[error("garland curve needs at least 2 samples, got {0}")]
    CurveSamples(usize),
    #[error("photo path pattern {0:?} has no {{index}} placeholder")]
    PhotoPattern(String),
}
