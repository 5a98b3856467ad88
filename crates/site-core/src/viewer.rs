//! Hero viewer state: scene graph, camera rig, and the load state machine.
//!
//! The web front-end owns one `HeroViewer` per container. It is created only
//! once the camera and output surface exist, so a viewer value is already in
//! the `SceneReady` phase; "uninitialised" is simply not having one.

use crate::camera::{PerspectiveCamera, Viewport};
use crate::constants::*;
use crate::geometry::{fit_to_size, Aabb, FitError};
use crate::lights::{default_rig, AmbientLight, DirectionalLight};
use crate::orbit::{OrbitControls, OrbitSettings};
use crate::stars::{StarField, StarStyle};
use crate::stl::{parse_stl, MeshGeometry, StlError};
use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

#[derive(Clone, Debug)]
pub struct StarFieldConfig {
    pub count: usize,
    pub extent: f32,
    pub style: StarStyle,
}

#[derive(Clone, Debug)]
pub struct MaterialConfig {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

/// Ambient term plus the directional lights, key light first.
#[derive(Clone, Debug)]
pub struct LightRigConfig {
    pub ambient: AmbientLight,
    pub directional: Vec<DirectionalLight>,
}

impl Default for LightRigConfig {
    fn default() -> Self {
        let (ambient, directional) = default_rig();
        Self {
            ambient,
            directional,
        }
    }
}

/// Everything a viewer instance needs to build its scene.
#[derive(Clone, Debug)]
pub struct HeroConfig {
    pub background: [f32; 3],
    pub camera: CameraConfig,
    pub controls: OrbitSettings,
    pub lights: LightRigConfig,
    pub star_fields: Vec<StarFieldConfig>,
    pub model_target_size: f32,
    pub model_base_yaw: f32,
    pub model_spin_per_frame: f32,
    pub material: MaterialConfig,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            background: SCENE_BACKGROUND,
            camera: CameraConfig {
                fov_deg: CAMERA_FOV_DEG,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                position: Vec3::from(CAMERA_POSITION),
            },
            controls: OrbitSettings::default(),
            lights: LightRigConfig::default(),
            star_fields: vec![
                StarFieldConfig {
                    count: SMALL_STAR_COUNT,
                    extent: SMALL_STAR_EXTENT,
                    style: StarStyle {
                        color: rgb_from_hex(SMALL_STAR_COLOR),
                        size: SMALL_STAR_SIZE,
                        opacity: SMALL_STAR_OPACITY,
                        size_attenuation: true,
                    },
                },
                StarFieldConfig {
                    count: BIG_STAR_COUNT,
                    extent: BIG_STAR_EXTENT,
                    style: StarStyle {
                        color: rgb_from_hex(BIG_STAR_COLOR),
                        size: BIG_STAR_SIZE,
                        opacity: BIG_STAR_OPACITY,
                        size_attenuation: true,
                    },
                },
            ],
            model_target_size: MODEL_TARGET_SIZE,
            model_base_yaw: MODEL_BASE_YAW,
            model_spin_per_frame: MODEL_SPIN_PER_FRAME,
            material: MaterialConfig {
                color: rgb_from_hex(MODEL_COLOR),
                roughness: MODEL_ROUGHNESS,
                metalness: MODEL_METALNESS,
            },
        }
    }
}

/// The loaded model placed in the scene.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub geometry: MeshGeometry,
    pub material: MaterialConfig,
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    /// Translation * rotation * scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.position,
        )
    }

    pub fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.geometry.positions())
    }

    pub fn world_bounds(&self) -> Option<Aabb> {
        self.local_bounds().map(|bb| bb.transformed(&self.model_matrix()))
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub background: [f32; 3],
    pub ambient: AmbientLight,
    pub lights: Vec<DirectionalLight>,
    pub star_fields: Vec<StarField>,
    mesh: Option<MeshNode>,
}

impl Scene {
    pub fn mesh(&self) -> Option<&MeshNode> {
        self.mesh.as_ref()
    }

    pub fn mesh_mut(&mut self) -> Option<&mut MeshNode> {
        self.mesh.as_mut()
    }

    fn insert_mesh(&mut self, node: MeshNode) -> Result<&MeshNode, ViewerError> {
        if self.mesh.is_some() {
            return Err(ViewerError::MeshAlreadyPresent);
        }
        let node = self.mesh.insert(node);
        Ok(&*node)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerPhase {
    SceneReady,
    ModelLoading { percent: Option<u32> },
    ModelReady,
    LoadError,
}

impl fmt::Display for ViewerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerPhase::SceneReady => write!(f, "scene-ready"),
            ViewerPhase::ModelLoading { .. } => write!(f, "model-loading"),
            ViewerPhase::ModelReady => write!(f, "model-ready"),
            ViewerPhase::LoadError => write!(f, "load-error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(#[from] StlError),
    #[error("fit error: {0}")]
    Fit(#[from] FitError),
    #[error(transparent)]
    Viewer(#[from] ViewerError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ViewerError {
    #[error("cannot {event} while {phase}")]
    InvalidTransition { phase: String, event: &'static str },
    #[error("mesh already added to the scene")]
    MeshAlreadyPresent,
}

/// Per-frame values the renderer consumes.
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    pub view: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub model: Option<Mat4>,
}

pub struct HeroViewer {
    config: HeroConfig,
    phase: ViewerPhase,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    output: Viewport,
    pub auto_rotate_model: bool,
}

impl HeroViewer {
    /// Build camera, controls, lights and starfields for `viewport`.
    pub fn new<R: Rng + ?Sized>(config: HeroConfig, viewport: Viewport, rng: &mut R) -> Self {
        let camera = PerspectiveCamera::new(
            config.camera.fov_deg,
            viewport.aspect(),
            config.camera.near,
            config.camera.far,
            config.camera.position,
        );
        let controls = OrbitControls::new(camera.eye, Vec3::ZERO, config.controls);
        let star_fields = config
            .star_fields
            .iter()
            .map(|sf| StarField::generate(rng, sf.count, sf.extent, sf.style))
            .collect();
        let scene = Scene {
            background: config.background,
            ambient: config.lights.ambient,
            lights: config.lights.directional.clone(),
            star_fields,
            mesh: None,
        };
        Self {
            config,
            phase: ViewerPhase::SceneReady,
            scene,
            camera,
            controls,
            output: viewport,
            auto_rotate_model: true,
        }
    }

    pub fn phase(&self) -> &ViewerPhase {
        &self.phase
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn output_size(&self) -> Viewport {
        self.output
    }

    pub fn begin_loading(&mut self) -> Result<(), ViewerError> {
        match self.phase {
            ViewerPhase::SceneReady => {
                self.phase = ViewerPhase::ModelLoading { percent: None };
                Ok(())
            }
            _ => Err(self.invalid("begin loading")),
        }
    }

    /// Record progress and return the loading readout, if there is one.
    pub fn on_progress(&mut self, loaded: f64, total: f64) -> Option<String> {
        let ViewerPhase::ModelLoading { percent } = &mut self.phase else {
            return None;
        };
        if !(total > 0.0) || !loaded.is_finite() {
            return None;
        }
        let pct = (loaded / total * 100.0).round().max(0.0) as u32;
        *percent = Some(pct);
        Some(format!("{}{}%", LOADING_TEXT_PREFIX, pct))
    }

    /// Decode, fit and insert the model; moves to `ModelReady` on success.
    pub fn on_model_bytes(&mut self, bytes: &[u8]) -> Result<&MeshNode, ModelLoadError> {
        let geometry = parse_stl(bytes)?;
        self.on_model_loaded(geometry)
    }

    pub fn on_model_loaded(
        &mut self,
        mut geometry: MeshGeometry,
    ) -> Result<&MeshNode, ModelLoadError> {
        if !matches!(self.phase, ViewerPhase::ModelLoading { .. }) {
            return Err(self.invalid("insert model").into());
        }
        let fit = match fit_to_size(&mut geometry, self.config.model_target_size) {
            Ok(fit) => fit,
            Err(e) => {
                self.phase = ViewerPhase::LoadError;
                return Err(e.into());
            }
        };
        log::info!(
            "[hero] model fitted: {} triangles, scale {:.4}",
            geometry.triangle_count(),
            fit.scale
        );
        let node = MeshNode {
            geometry,
            material: self.config.material.clone(),
            position: Vec3::ZERO,
            rotation_y: self.config.model_base_yaw,
            scale: fit.scale,
            cast_shadow: true,
            receive_shadow: true,
        };
        self.phase = ViewerPhase::ModelReady;
        Ok(self.scene.insert_mesh(node)?)
    }

    /// Terminal failure; returns the overlay message.
    pub fn on_load_failed(&mut self, err: &ModelLoadError) -> &'static str {
        log::error!("[hero] error loading model: {}", err);
        self.phase = ViewerPhase::LoadError;
        LOAD_ERROR_MESSAGE
    }

    /// Match camera aspect and output size to the new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.aspect = viewport.aspect();
        self.output = viewport;
    }

    /// Spin the model, step the controls, and return the matrices to draw.
    pub fn frame(&mut self) -> FrameState {
        let spin = self.config.model_spin_per_frame;
        let auto = self.auto_rotate_model;
        if let Some(mesh) = self.scene.mesh_mut() {
            if auto {
                mesh.rotation_y += spin;
            }
        }
        self.camera.eye = self.controls.update();
        self.camera.target = self.controls.target;
        FrameState {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            eye: self.camera.eye,
            model: self.scene.mesh().map(MeshNode::model_matrix),
        }
    }

    fn invalid(&self, event: &'static str) -> ViewerError {
        ViewerError::InvalidTransition {
            phase: self.phase.to_string(),
            event,
        }
    }
}
