//! Camera and viewport types shared with the web renderer.
//!
//! These avoid platform APIs so the resize and projection rules can be
//! checked on the host.

use glam::{Mat4, Vec3};

/// Output surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a zero height is treated as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Right-handed perspective camera looking at `target`.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, znear: f32, zfar: f32, eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: fov_deg.to_radians(),
            znear,
            zfar,
        }
    }

    /// Clip-space projection matrix (depth 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
