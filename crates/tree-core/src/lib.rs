pub mod camera;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod input;
pub mod instanced;
pub mod mesh;
pub mod morph;
pub mod panel;
pub mod sampler;
pub mod scene;
pub mod state;

pub use camera::*;
pub use config::*;
pub use curve::*;
pub use error::*;
pub use input::*;
pub use instanced::*;
pub use mesh::*;
pub use morph::*;
pub use panel::*;
pub use sampler::*;
pub use scene::*;
pub use state::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
