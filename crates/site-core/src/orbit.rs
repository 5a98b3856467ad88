//! Damped orbit camera rig.
//!
//! The camera sits on a sphere around `target`. Input and auto-rotation
//! accumulate angular deltas; `update` bleeds a fraction of the pending delta
//! into the position each frame, which gives the damped feel.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

const POLAR_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            enable_damping: true,
            damping_factor: CONTROLS_DAMPING_FACTOR,
            auto_rotate: true,
            auto_rotate_speed: CONTROLS_AUTO_ROTATE_SPEED,
            rotate_speed: CONTROLS_ROTATE_SPEED,
            enable_zoom: false,
            enable_pan: false,
            min_distance: CONTROLS_MIN_DISTANCE,
            max_distance: CONTROLS_MAX_DISTANCE,
        }
    }
}

/// Spherical coordinates with `theta` around +Y from +Z and `phi` from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub settings: OrbitSettings,
    pub target: Vec3,
    spherical: Spherical,
    pending_theta: f32,
    pending_phi: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        Self {
            settings,
            target,
            spherical: Spherical::from_offset(eye - target),
            pending_theta: 0.0,
            pending_phi: 0.0,
        }
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Angle added per frame by auto-rotation.
    pub fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.settings.auto_rotate_speed
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.pending_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.pending_phi -= angle;
    }

    /// Pointer drag of `(dx, dy)` pixels over an element `element_height` tall.
    pub fn drag(&mut self, dx: f32, dy: f32, element_height: f32) {
        let h = element_height.max(1.0);
        let speed = self.settings.rotate_speed;
        self.rotate_left(TAU * dx / h * speed);
        self.rotate_up(TAU * dy / h * speed);
    }

    /// Dolly request; returns false (and leaves the rig alone) when zoom is off.
    pub fn dolly(&mut self, scale: f32) -> bool {
        if !self.settings.enable_zoom || scale <= 0.0 {
            return false;
        }
        self.spherical.radius /= scale;
        true
    }

    /// Pan request; returns false when panning is off.
    pub fn pan(&mut self, offset: Vec3) -> bool {
        if !self.settings.enable_pan {
            return false;
        }
        self.target += offset;
        true
    }

    /// Advance one frame and return the new camera eye.
    pub fn update(&mut self) -> Vec3 {
        if self.settings.auto_rotate {
            let angle = self.auto_rotation_angle();
            self.rotate_left(angle);
        }

        let s = &self.settings;
        if s.enable_damping {
            self.spherical.theta += self.pending_theta * s.damping_factor;
            self.spherical.phi += self.pending_phi * s.damping_factor;
        } else {
            self.spherical.theta += self.pending_theta;
            self.spherical.phi += self.pending_phi;
        }

        self.spherical.phi = self.spherical.phi.clamp(POLAR_EPS, PI - POLAR_EPS);
        self.spherical.radius = self.spherical.radius.clamp(s.min_distance, s.max_distance);

        if s.enable_damping {
            let keep = 1.0 - s.damping_factor;
            self.pending_theta *= keep;
            self.pending_phi *= keep;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }

        self.target + self.spherical.to_offset()
    }
}
