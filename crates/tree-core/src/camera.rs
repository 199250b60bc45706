//! Camera description shared with the frontends.
//!
//! The core only reads a [`CameraPose`] back from the host (for the panel focus
//! behaviour); the full [`Camera`] lives here so frontends build their view and
//! picking rays the same way.

use glam::{Mat4, Vec3, Vec4};

/// Position and unit forward direction of the viewing camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Fixed front view of the tree used by the frontends.
    pub fn looking_at_tree(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(crate::constants::CAMERA_EYE),
            target: Vec3::from(crate::constants::CAMERA_TARGET),
            up: Vec3::Y,
            aspect,
            fovy_radians: crate::constants::CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.eye, self.forward())
    }

    /// World-space ray through pixel `(sx, sy)` of a `width × height` viewport.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).try_normalize().unwrap_or(self.forward());
        (ro, rd)
    }
}
