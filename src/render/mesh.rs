use super::{helpers, DEPTH_FORMAT, MSAA_SAMPLES, SHADOW_FORMAT};
use site_core::MeshVertex;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ModelUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) normal: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
    pub(crate) material: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ShadowUniforms {
    pub(crate) light_view_proj: [[f32; 4]; 4],
}

/// Uploaded model geometry.
pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

pub(crate) fn upload_mesh(device: &wgpu::Device, vertices: &[MeshVertex]) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("model_vertices"),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    GpuMesh {
        vertex_buffer,
        vertex_count: vertices.len() as u32,
    }
}

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const POSITION_ONLY: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn vertex_layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

pub(crate) struct MeshResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) model_bgl: wgpu::BindGroupLayout,
    pub(crate) model_buffer: wgpu::Buffer,
    pub(crate) model_bind_group: wgpu::BindGroup,
}

pub(crate) fn create_mesh_resources(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> MeshResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: wgpu::ShaderSource::Wgsl(super::MESH_WGSL.into()),
    });
    let model_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("model_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("mesh_pl"),
        bind_group_layouts: &[scene_bgl, &model_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("mesh_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_mesh"),
            buffers: &[vertex_layout(&MESH_ATTRIBUTES)],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: MSAA_SAMPLES,
            ..Default::default()
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_mesh"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let model_buffer = helpers::create_uniform_buffer::<ModelUniforms>(device, "model_uniforms");
    let model_bind_group =
        helpers::single_buffer_bind_group(device, "model_bg", &model_bgl, &model_buffer);
    MeshResources {
        pipeline,
        model_bgl,
        model_buffer,
        model_bind_group,
    }
}

#[allow(dead_code)]
pub(crate) struct ShadowResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) map_tex: wgpu::Texture,
    pub(crate) map_view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) map_size: u32,
}

pub(crate) fn create_shadow_resources(
    device: &wgpu::Device,
    model_bgl: &wgpu::BindGroupLayout,
    map_size: u32,
) -> ShadowResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("shadow_shader"),
        source: wgpu::ShaderSource::Wgsl(super::SHADOW_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("shadow_bgl"),
        entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("shadow_pl"),
        bind_group_layouts: &[&bgl, model_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("shadow_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_shadow"),
            buffers: &[vertex_layout(&POSITION_ONLY)],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: SHADOW_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState {
                constant: 2,
                slope_scale: 2.0,
                clamp: 0.0,
            },
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: None,
        cache: None,
        multiview: None,
    });
    let uniform_buffer = helpers::create_uniform_buffer::<ShadowUniforms>(device, "shadow_uniforms");
    let bind_group = helpers::single_buffer_bind_group(device, "shadow_bg", &bgl, &uniform_buffer);
    let (map_tex, map_view) = helpers::create_texture(
        device,
        "shadow_map",
        map_size,
        map_size,
        1,
        SHADOW_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    );
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("shadow_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        compare: Some(wgpu::CompareFunction::LessEqual),
        ..Default::default()
    });
    ShadowResources {
        pipeline,
        uniform_buffer,
        bind_group,
        map_tex,
        map_view,
        sampler,
        map_size,
    }
}
