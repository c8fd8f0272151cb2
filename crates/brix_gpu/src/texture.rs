//! Texture upload
//!
//! Each draw call binds zero or one 2-D texture: the sprite program's
//! image or the glyph program's distance-field atlas. A [`GpuTexture`]
//! owns the wgpu texture and the group-1 bind group the pipelines
//! expect.

use std::sync::Arc;

/// An uploaded RGBA8 texture with its bind group.
pub struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl GpuTexture {
    /// Upload `pixels` (tightly packed RGBA8, row-major) and build the
    /// bind group against the renderer's texture layout.
    pub(crate) fn upload(
        device: &Arc<wgpu::Device>,
        queue: &Arc<wgpu::Queue>,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        tracing::debug!(width, height, "uploading texture");

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("brix Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("brix Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }
}
