use crate::constants::*;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Orthographic frustum used to render a directional light's shadow map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
}

/// Light shining from `position` toward the origin.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub shadow: Option<ShadowFrustum>,
}

impl DirectionalLight {
    pub fn casts_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// Unit vector from the surface toward the light.
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }

    /// Light-space view-projection for the shadow pass.
    pub fn shadow_view_projection(&self) -> Option<Mat4> {
        let s = self.shadow?;
        // Straight-down lights would make `Y` a degenerate up vector.
        let up = if self.direction_to_light().abs_diff_eq(Vec3::Y, 1e-4)
            || self.direction_to_light().abs_diff_eq(-Vec3::Y, 1e-4)
        {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, up);
        let proj = Mat4::orthographic_rh(s.left, s.right, s.bottom, s.top, s.near, s.far);
        Some(proj * view)
    }
}

/// Ambient plus one shadow-casting key light and two fill lights.
pub fn default_rig() -> (AmbientLight, Vec<DirectionalLight>) {
    let ambient = AmbientLight {
        color: rgb_from_hex(AMBIENT_COLOR),
        intensity: AMBIENT_INTENSITY,
    };
    let key = DirectionalLight {
        color: rgb_from_hex(KEY_LIGHT_COLOR),
        intensity: KEY_LIGHT_INTENSITY,
        position: Vec3::from(KEY_LIGHT_POSITION),
        shadow: Some(ShadowFrustum {
            left: -KEY_SHADOW_HALF_EXTENT,
            right: KEY_SHADOW_HALF_EXTENT,
            top: KEY_SHADOW_HALF_EXTENT,
            bottom: -KEY_SHADOW_HALF_EXTENT,
            near: KEY_SHADOW_NEAR,
            far: KEY_SHADOW_FAR,
            map_size: KEY_SHADOW_MAP_SIZE,
        }),
    };
    let fill_a = DirectionalLight {
        color: rgb_from_hex(FILL_LIGHT_A_COLOR),
        intensity: FILL_LIGHT_A_INTENSITY,
        position: Vec3::from(FILL_LIGHT_A_POSITION),
        shadow: None,
    };
    let fill_b = DirectionalLight {
        color: rgb_from_hex(FILL_LIGHT_B_COLOR),
        intensity: FILL_LIGHT_B_INTENSITY,
        position: Vec3::from(FILL_LIGHT_B_POSITION),
        shadow: None,
    };
    (ambient, vec![key, fill_a, fill_b])
}
