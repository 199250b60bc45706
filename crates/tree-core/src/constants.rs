// Shared placement/animation tuning constants used by the core and the native frontend.

// Tree silhouette (frustum)
pub const TREE_HEIGHT: f32 = 11.0;
pub const TREE_RADIUS_BASE: f32 = 4.6;
pub const TREE_RADIUS_TOP: f32 = 0.25;
pub const TREE_Y_BASE: f32 = -5.5;

// Default element counts
pub const NEEDLE_COUNT: usize = 2400;
pub const ORNAMENT_PRIMARY_COUNT: usize = 85;
pub const ORNAMENT_SECONDARY_COUNT: usize = 42;
pub const GARLAND_BEAD_COUNT: usize = 160;
pub const PANEL_COUNT: usize = 25;

// Scatter cloud
pub const SCATTER_RADIUS: f32 = 14.0;
pub const PANEL_SCATTER_RADIUS: f32 = 10.0;

// Frustum-biased sampling
pub const NEEDLE_SURFACE_BIAS: f32 = 0.12;
pub const NEEDLE_HEIGHT_BIAS: f32 = 1.2;
pub const ORNAMENT_SURFACE_BIAS: f32 = 0.05;
pub const ORNAMENT_HEIGHT_BIAS: f32 = 1.1;
pub const ORNAMENT_RADIAL_OFFSET: f32 = 0.18; // pushes ornaments just outside the foliage shell

// Per-element seeds: (index + 1) * SEED_PRIME decorrelates neighbours in trig noise
pub const SEED_PRIME: f32 = 7919.0;

// Garland spiral
pub const GARLAND_TURNS: f32 = 6.0;
pub const GARLAND_CURVE_SAMPLES: usize = 220;
pub const GARLAND_TENSION: f32 = 0.8;
pub const SPIRAL_SURFACE_OFFSET: f32 = 0.22; // spiral radius = frustum radius + offset
pub const GARLAND_SCATTER_RADIUS_MIN: f32 = 7.0; // donut the beads drift in when scattered
pub const GARLAND_SCATTER_RADIUS_MAX: f32 = 13.0;
pub const GARLAND_SCATTER_HEIGHT_MARGIN: f32 = 0.15; // fraction of height below/above the frustum
pub const GARLAND_TUBE_RADIUS: f32 = 0.035;

// Panel grid
pub const PANEL_RADIUS_FACTOR: f32 = 1.08; // just outside the shell
pub const PANEL_LAYER_ANGLE_OFFSET: f32 = 0.6; // radians per layer, avoids vertical seams
pub const PANEL_WIDTH: f32 = 0.9;
pub const PANEL_HEIGHT: f32 = 1.08;
pub const PANEL_SCALE: f32 = 1.0;

// Uniform element scale ranges (drawn once, shared by both configurations)
pub const NEEDLE_SCALE_MIN: f32 = 0.6;
pub const NEEDLE_SCALE_MAX: f32 = 1.4;
pub const ORNAMENT_SCALE_MIN: f32 = 0.16;
pub const ORNAMENT_SCALE_MAX: f32 = 0.3;
pub const BEAD_SCALE_MIN: f32 = 0.06;
pub const BEAD_SCALE_MAX: f32 = 0.1;

// Idle float
pub const IDLE_FLOAT_SPEED: f32 = 0.9; // radians per second
pub const IDLE_FLOAT_SEED_SCALE: f32 = 0.001; // ε applied to seeds
pub const IDLE_FLOAT_AMPLITUDE: f32 = 0.35;
pub const PANEL_IDLE_FLOAT_AMPLITUDE: f32 = 0.25;

// Panel orientation gate: strict outward-facing only in the final quarter
pub const OUTWARD_GATE_START: f32 = 0.75;
pub const OUTWARD_GATE_SPAN: f32 = 0.25;

// Focus behaviour
pub const FOCUS_DISTANCE: f32 = 4.0; // along camera forward
pub const FOCUS_DROP: f32 = 0.25; // downward offset so the panel sits below the eye line
pub const FOCUS_SCALE: f32 = 2.2; // world-space scale of the focused panel
pub const FOCUS_BLEND_PER_FRAME: f32 = 0.18; // damped approach factor at the reference rate
pub const FOCUS_REFERENCE_HZ: f32 = 60.0;

// Interaction
pub const WHEEL_SENSITIVITY: f32 = 0.0012; // progress per wheel pixel
pub const MODE_THRESHOLD: f32 = 0.5;

// Viewport fit
pub const FIT_REFERENCE_ASPECT: f32 = 1.0; // narrower than this shrinks the scene
pub const MIN_FIT_SCALE: f32 = 0.45;
pub const ROOT_Y_OFFSET: f32 = 0.0;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.0, 20.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;

// Default palette
pub const NEEDLE_COLOR: [f32; 3] = [0.08, 0.42, 0.22];
pub const ORNAMENT_PRIMARY_COLOR: [f32; 3] = [0.86, 0.12, 0.16];
pub const ORNAMENT_SECONDARY_COLOR: [f32; 3] = [0.95, 0.75, 0.28];
pub const GARLAND_COLOR: [f32; 3] = [1.0, 0.88, 0.55];
pub const PANEL_FRAME_COLOR: [f32; 3] = [0.97, 0.96, 0.93];

// Photo lookup
pub const PHOTO_PATH_PATTERN: &str = "photos/{index}.jpg";
