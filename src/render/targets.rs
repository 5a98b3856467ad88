use super::helpers;
use super::{DEPTH_FORMAT, MSAA_SAMPLES};

/// Multisampled colour and depth attachments for the main pass.
///
/// The colour target resolves into the swapchain texture each frame.
#[allow(dead_code)]
pub(crate) struct FrameTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl FrameTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let (msaa_tex, msaa_view) = helpers::create_texture(
            device,
            "msaa_color",
            width,
            height,
            MSAA_SAMPLES,
            color_format,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let (depth_tex, depth_view) = helpers::create_texture(
            device,
            "depth",
            width,
            height,
            MSAA_SAMPLES,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self {
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        *self = Self::new(device, color_format, width, height);
    }
}
