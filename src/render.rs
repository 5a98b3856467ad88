use site_core::{FrameState, MeshNode, Scene};
use web_sys as web;

mod helpers;
mod mesh;
mod points;
mod targets;

use helpers::mat4_cols;
use mesh::{GpuMesh, MeshResources, ModelUniforms, ShadowResources, ShadowUniforms};
use points::StarLayer;
use targets::FrameTargets;

pub(crate) const MSAA_SAMPLES: u32 = 4;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub(crate) const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Shaders bundled as string constants; `common.wgsl` declares the shared structs.
pub(crate) static MESH_WGSL: &str = concat!(
    include_str!("../shaders/common.wgsl"),
    include_str!("../shaders/mesh.wgsl")
);
pub(crate) static SHADOW_WGSL: &str = concat!(
    include_str!("../shaders/common.wgsl"),
    include_str!("../shaders/shadow.wgsl")
);
pub(crate) static POINTS_WGSL: &str = concat!(
    include_str!("../shaders/common.wgsl"),
    include_str!("../shaders/points.wgsl")
);

const MAX_LIGHTS: usize = 3;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    light_dir: [[f32; 4]; MAX_LIGHTS],
    light_color: [[f32; 4]; MAX_LIGHTS],
    viewport: [f32; 4],
}

/// WebGPU renderer for the hero scene.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: FrameTargets,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    mesh: MeshResources,
    shadow: ShadowResources,
    points_pipeline: wgpu::RenderPipeline,
    star_layers: Vec<StarLayer>,
    model: Option<GpuMesh>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Let the page show through wherever the scene is transparent.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let targets = FrameTargets::new(&device, format, width, height);

        let map_size = scene
            .lights
            .iter()
            .find_map(|l| l.shadow.map(|s| s.map_size))
            .unwrap_or(1);
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[
                helpers::uniform_layout_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let mesh = mesh::create_mesh_resources(&device, &scene_bgl, format);
        let shadow = mesh::create_shadow_resources(&device, &mesh.model_bgl, map_size);
        let (points_pipeline, stars_bgl) =
            points::create_points_pipeline(&device, &scene_bgl, format);

        let scene_buffer = helpers::create_uniform_buffer::<SceneUniforms>(&device, "scene_uniforms");
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow.map_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow.sampler),
                },
            ],
        });

        let star_layers = scene
            .star_fields
            .iter()
            .filter(|f| !f.is_empty())
            .map(|f| points::create_star_layer(&device, &stars_bgl, f))
            .collect();

        let [r, g, b] = scene.background;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene_buffer,
            scene_bind_group,
            mesh,
            shadow,
            points_pipeline,
            star_layers,
            model: None,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    /// Upload the model once it has been fitted.
    pub fn set_model(&mut self, node: &MeshNode) {
        self.model = Some(mesh::upload_mesh(&self.device, &node.geometry.vertices));
        log::info!("[gpu] model uploaded ({} vertices)", node.geometry.vertices.len());
    }

    /// Reconfigure the surface for a new size in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets
                .recreate(&self.device, self.config.format, width, height);
        }
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &FrameState, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let uniforms = self.scene_uniforms(frame, scene);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));
        self.queue.write_buffer(
            &self.shadow.uniform_buffer,
            0,
            bytemuck::bytes_of(&ShadowUniforms {
                light_view_proj: uniforms.light_view_proj,
            }),
        );
        if let (Some(model), Some(node)) = (frame.model, scene.mesh()) {
            let m = &node.material;
            let receive = if node.receive_shadow { 1.0 } else { 0.0 };
            let mu = ModelUniforms {
                model: mat4_cols(model),
                normal: mat4_cols(model.inverse().transpose()),
                color: [m.color[0], m.color[1], m.color[2], 1.0],
                material: [m.roughness, m.metalness, receive, 0.0],
            };
            self.queue
                .write_buffer(&self.mesh.model_buffer, 0, bytemuck::bytes_of(&mu));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let casts_shadow = scene.mesh().map(|n| n.cast_shadow).unwrap_or(false);
        {
            // Always cleared so an absent model samples as fully lit.
            let mut spass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow.map_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let (true, Some(gpu_mesh)) = (casts_shadow, &self.model) {
                spass.set_pipeline(&self.shadow.pipeline);
                spass.set_bind_group(0, &self.shadow.bind_group, &[]);
                spass.set_bind_group(1, &self.mesh.model_bind_group, &[]);
                spass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                spass.draw(0..gpu_mesh.vertex_count, 0..1);
            }
        }
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            if let (Some(_), Some(gpu_mesh)) = (frame.model, &self.model) {
                rpass.set_pipeline(&self.mesh.pipeline);
                rpass.set_bind_group(1, &self.mesh.model_bind_group, &[]);
                rpass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                rpass.draw(0..gpu_mesh.vertex_count, 0..1);
            }
            rpass.set_pipeline(&self.points_pipeline);
            for layer in &self.star_layers {
                rpass.set_bind_group(1, &layer.bind_group, &[]);
                rpass.set_vertex_buffer(0, layer.instances.slice(..));
                rpass.draw(0..6, 0..layer.count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn scene_uniforms(&self, frame: &FrameState, scene: &Scene) -> SceneUniforms {
        let mut light_dir = [[0.0f32; 4]; MAX_LIGHTS];
        let mut light_color = [[0.0f32; 4]; MAX_LIGHTS];
        let mut light_view_proj = glam::Mat4::IDENTITY;
        for (i, light) in scene.lights.iter().take(MAX_LIGHTS).enumerate() {
            let d = light.direction_to_light();
            let casts = if light.casts_shadow() { 1.0 } else { 0.0 };
            light_dir[i] = [d.x, d.y, d.z, casts];
            let c = light.color;
            light_color[i] = [
                c[0] * light.intensity,
                c[1] * light.intensity,
                c[2] * light.intensity,
                1.0,
            ];
            if let Some(vp) = light.shadow_view_projection() {
                light_view_proj = vp;
            }
        }
        let a = scene.ambient;
        SceneUniforms {
            view: mat4_cols(frame.view),
            proj: mat4_cols(frame.projection),
            light_view_proj: mat4_cols(light_view_proj),
            camera_pos: [frame.eye.x, frame.eye.y, frame.eye.z, 1.0],
            ambient: [
                a.color[0] * a.intensity,
                a.color[1] * a.intensity,
                a.color[2] * a.intensity,
                1.0,
            ],
            light_dir,
            light_color,
            viewport: [
                self.width as f32,
                self.height as f32,
                self.shadow.map_size as f32,
                0.0,
            ],
        }
    }
}
