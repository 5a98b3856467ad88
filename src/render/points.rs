use super::{helpers, DEPTH_FORMAT, MSAA_SAMPLES};
use site_core::StarField;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct StarUniforms {
    pub(crate) color: [f32; 4],
    pub(crate) params: [f32; 4],
}

/// One static point cloud drawn as instanced quads.
pub(crate) struct StarLayer {
    pub(crate) instances: wgpu::Buffer,
    pub(crate) count: u32,
    pub(crate) bind_group: wgpu::BindGroup,
}

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub(crate) fn create_points_pipeline(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, wgpu::BindGroupLayout) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(super::POINTS_WGSL.into()),
    });
    let stars_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("stars_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[scene_bgl, &stars_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("points_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_points"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        // Transparent: test against the model but never occlude each other.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
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
            entry_point: Some("fs_points"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    (pipeline, stars_bgl)
}

pub(crate) fn create_star_layer(
    device: &wgpu::Device,
    stars_bgl: &wgpu::BindGroupLayout,
    field: &StarField,
) -> StarLayer {
    let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("star_instances"),
        contents: bytemuck::cast_slice(&field.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let s = field.style;
    let uniforms = StarUniforms {
        color: [s.color[0], s.color[1], s.color[2], s.opacity],
        params: [s.size, if s.size_attenuation { 1.0 } else { 0.0 }, 0.0, 0.0],
    };
    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("star_uniforms"),
        contents: bytemuck::bytes_of(&uniforms),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let bind_group =
        helpers::single_buffer_bind_group(device, "stars_bg", stars_bgl, &uniform_buffer);
    StarLayer {
        instances,
        count: field.positions.len() as u32,
        bind_group,
    }
}
