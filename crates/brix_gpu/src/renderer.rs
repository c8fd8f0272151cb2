//! GPU renderer
//!
//! Owns the wgpu device, the three program pipelines, and the uniform
//! and mesh buffers. The external pipeline uploads batches, binds at
//! most one texture per program, and picks which programs draw; the
//! renderer never decides content, only executes the fragment programs
//! from [`crate::shaders`].

use std::sync::Arc;

use brix_core::{GlyphShading, Mat4};
use wgpu::util::DeviceExt;

use crate::batch::{BlockBatch, QuadBatch};
use crate::shaders::{BLOCK_SHADER, GLYPH_SHADER, SPRITE_SHADER};
use crate::texture::GpuTexture;
use crate::vertex::{BlockVertex, GlyphUniforms, QuadVertex, TransformUniforms};

/// Straight-alpha "over" blending, as the original pipeline configures:
/// `src × src.a + dst × (1 − src.a)` on every channel.
const STRAIGHT_ALPHA_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Error type for renderer operations.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    /// No suitable GPU adapter was found.
    #[error("no suitable GPU adapter found")]
    AdapterNotFound,
    /// Failed to request the GPU device.
    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// Failed to create the window surface.
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    /// Offscreen readback failed.
    #[error("readback failed: {0}")]
    Readback(String),
}

/// Configuration for creating a renderer.
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Initial block-batch capacity, in quads. Buffers grow past it.
    pub initial_block_capacity: usize,
    /// Initial sprite/glyph batch capacity, in quads.
    pub initial_quad_capacity: usize,
    /// Texture format (None = surface preferred, or RGBA8 sRGB headless).
    pub texture_format: Option<wgpu::TextureFormat>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            initial_block_capacity: 1_000,
            initial_quad_capacity: 1_000,
            texture_format: None,
        }
    }
}

/// Render pipelines, one per fragment program.
struct Pipelines {
    block: wgpu::RenderPipeline,
    sprite: wgpu::RenderPipeline,
    glyph: wgpu::RenderPipeline,
}

/// A grow-on-demand vertex/index buffer pair for one program's batch.
struct MeshBuffers {
    label: &'static str,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    index_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, label: &'static str, vertex_capacity: usize) -> Self {
        let index_capacity = vertex_capacity.max(4096);
        Self {
            label,
            vertices: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: vertex_capacity as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            indices: device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: index_capacity as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            vertex_capacity,
            index_capacity,
            index_count: 0,
        }
    }

    /// Upload a batch, growing the buffers by powers of two as needed.
    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertex_bytes: &[u8],
        indices: &[u32],
    ) {
        self.index_count = indices.len() as u32;
        if indices.is_empty() {
            return;
        }

        if vertex_bytes.len() > self.vertex_capacity {
            self.vertex_capacity = vertex_bytes.len().next_power_of_two().max(4096);
            tracing::debug!(
                label = self.label,
                capacity = self.vertex_capacity,
                "growing vertex buffer"
            );
            self.vertices = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: self.vertex_capacity as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }

        let index_bytes = std::mem::size_of_val(indices);
        if index_bytes > self.index_capacity {
            self.index_capacity = index_bytes.next_power_of_two().max(4096);
            self.indices = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: self.index_capacity as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }

        queue.write_buffer(&self.vertices, 0, vertex_bytes);
        queue.write_buffer(&self.indices, 0, bytemuck::cast_slice(indices));
    }
}

/// The brix renderer.
///
/// Each frame: upload batches, then [`Renderer::render`] into a target
/// view. Program selection is per draw call — a batch left empty simply
/// isn't drawn.
pub struct Renderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    texture_format: wgpu::TextureFormat,
    pipelines: Pipelines,
    transform_buffer: wgpu::Buffer,
    glyph_uniform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    glyph_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    transform: Mat4,
    glyph_shading: GlyphShading,
    blocks: MeshBuffers,
    sprites: MeshBuffers,
    glyphs: MeshBuffers,
}

impl Renderer {
    /// Create a renderer without a surface (headless / offscreen).
    pub async fn new(config: RendererConfig) -> Result<Self, RendererError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;

        let (device, queue) = Self::request_device(&adapter).await?;

        let texture_format = config
            .texture_format
            .unwrap_or(wgpu::TextureFormat::Rgba8UnormSrgb);

        Ok(Self::create_renderer(device, queue, texture_format, &config))
    }

    /// Create a renderer drawing to a window surface.
    ///
    /// Surface configuration (size, present mode) stays with the
    /// caller; the renderer only needs the texture format agreed here.
    pub async fn with_surface<W>(
        window: Arc<W>,
        config: RendererConfig,
    ) -> Result<(Self, wgpu::Surface<'static>), RendererError>
    where
        W: raw_window_handle::HasWindowHandle
            + raw_window_handle::HasDisplayHandle
            + Send
            + Sync
            + 'static,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;

        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        tracing::debug!(formats = ?surface_caps.formats, "surface capabilities");
        let texture_format = config.texture_format.unwrap_or_else(|| {
            surface_caps
                .formats
                .iter()
                .find(|f| f.is_srgb())
                .copied()
                .unwrap_or(surface_caps.formats[0])
        });

        let renderer = Self::create_renderer(device, queue, texture_format, &config);
        Ok((renderer, surface))
    }

    async fn request_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(Arc<wgpu::Device>, Arc<wgpu::Queue>), RendererError> {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("brix Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;
        Ok((Arc::new(device), Arc::new(queue)))
    }

    fn create_renderer(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        texture_format: wgpu::TextureFormat,
        config: &RendererConfig,
    ) -> Self {
        tracing::debug!(?texture_format, "creating renderer");

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("brix Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                // The glyph program reads its smoothing in the fragment
                // stage.
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("brix Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("brix Transform Uniforms"),
            contents: bytemuck::cast_slice(&[TransformUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let glyph_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("brix Glyph Uniforms"),
            contents: bytemuck::cast_slice(&[GlyphUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("brix Transform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let glyph_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("brix Glyph Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: glyph_uniform_buffer.as_entire_binding(),
            }],
        });

        let pipelines =
            Self::create_pipelines(&device, &uniform_layout, &texture_layout, texture_format);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("brix Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let block_vertex_bytes = config.initial_block_capacity * 4 * std::mem::size_of::<BlockVertex>();
        let quad_vertex_bytes = config.initial_quad_capacity * 4 * std::mem::size_of::<QuadVertex>();

        let blocks = MeshBuffers::new(&device, "brix Block Mesh", block_vertex_bytes.max(4096));
        let sprites = MeshBuffers::new(&device, "brix Sprite Mesh", quad_vertex_bytes.max(4096));
        let glyphs = MeshBuffers::new(&device, "brix Glyph Mesh", quad_vertex_bytes.max(4096));

        Self {
            device,
            queue,
            texture_format,
            pipelines,
            transform_buffer,
            glyph_uniform_buffer,
            transform_bind_group,
            glyph_bind_group,
            texture_layout,
            sampler,
            transform: Mat4::IDENTITY,
            glyph_shading: GlyphShading::default(),
            blocks,
            sprites,
            glyphs,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::PipelineLayout,
        source: &str,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(STRAIGHT_ALPHA_BLEND),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_pipelines(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> Pipelines {
        let block_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("brix Block Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("brix Textured Pipeline Layout"),
            bind_group_layouts: &[uniform_layout, texture_layout],
            push_constant_ranges: &[],
        });

        Pipelines {
            block: Self::create_pipeline(
                device,
                "brix Block Pipeline",
                &block_layout,
                BLOCK_SHADER,
                BlockVertex::desc(),
                format,
            ),
            sprite: Self::create_pipeline(
                device,
                "brix Sprite Pipeline",
                &textured_layout,
                SPRITE_SHADER,
                QuadVertex::desc(),
                format,
            ),
            glyph: Self::create_pipeline(
                device,
                "brix Glyph Pipeline",
                &textured_layout,
                GLYPH_SHADER,
                QuadVertex::desc(),
                format,
            ),
        }
    }

    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    pub fn texture_format(&self) -> wgpu::TextureFormat {
        self.texture_format
    }

    /// Set the combined matrix shared by all programs. Uploaded once;
    /// immutable for the duration of each draw.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.queue.write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::cast_slice(&[TransformUniforms::from(transform)]),
        );
        self.write_glyph_uniforms();
    }

    /// Set the SDF smoothing half-width for the glyph program.
    pub fn set_glyph_shading(&mut self, shading: GlyphShading) {
        self.glyph_shading = shading;
        self.write_glyph_uniforms();
    }

    fn write_glyph_uniforms(&self) {
        self.queue.write_buffer(
            &self.glyph_uniform_buffer,
            0,
            bytemuck::cast_slice(&[GlyphUniforms::new(self.transform, self.glyph_shading)]),
        );
    }

    /// Upload a block batch for the next [`Renderer::render`].
    pub fn upload_blocks(&mut self, batch: &BlockBatch) {
        self.blocks.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&batch.vertices),
            &batch.indices,
        );
    }

    /// Upload a sprite batch for the next [`Renderer::render`].
    pub fn upload_sprites(&mut self, batch: &QuadBatch) {
        self.sprites.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&batch.vertices),
            &batch.indices,
        );
    }

    /// Upload a glyph batch for the next [`Renderer::render`].
    pub fn upload_glyphs(&mut self, batch: &QuadBatch) {
        self.glyphs.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&batch.vertices),
            &batch.indices,
        );
    }

    /// Upload an RGBA8 texture for the sprite program or the glyph
    /// atlas.
    pub fn create_texture(&self, pixels: &[u8], width: u32, height: u32) -> GpuTexture {
        GpuTexture::upload(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            pixels,
            width,
            height,
        )
    }

    /// Record one render pass drawing every non-empty uploaded batch:
    /// blocks, then sprites, then glyphs.
    ///
    /// `clear` of `None` loads the existing target contents. Binding
    /// validation is the caller's contract: a sprite or glyph batch
    /// uploaded without its texture is skipped.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: Option<wgpu::Color>,
        sprite_texture: Option<&GpuTexture>,
        glyph_atlas: Option<&GpuTexture>,
    ) {
        let load = match clear {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("brix Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.blocks.index_count > 0 {
            render_pass.set_pipeline(&self.pipelines.block);
            render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.blocks.vertices.slice(..));
            render_pass.set_index_buffer(self.blocks.indices.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.blocks.index_count, 0, 0..1);
        }

        if self.sprites.index_count > 0 {
            match sprite_texture {
                Some(texture) => {
                    render_pass.set_pipeline(&self.pipelines.sprite);
                    render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
                    render_pass.set_bind_group(1, texture.bind_group(), &[]);
                    render_pass.set_vertex_buffer(0, self.sprites.vertices.slice(..));
                    render_pass
                        .set_index_buffer(self.sprites.indices.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..self.sprites.index_count, 0, 0..1);
                }
                None => tracing::debug!("sprite batch uploaded without a texture; skipping"),
            }
        }

        if self.glyphs.index_count > 0 {
            match glyph_atlas {
                Some(atlas) => {
                    render_pass.set_pipeline(&self.pipelines.glyph);
                    render_pass.set_bind_group(0, &self.glyph_bind_group, &[]);
                    render_pass.set_bind_group(1, atlas.bind_group(), &[]);
                    render_pass.set_vertex_buffer(0, self.glyphs.vertices.slice(..));
                    render_pass
                        .set_index_buffer(self.glyphs.indices.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..self.glyphs.index_count, 0, 0..1);
                }
                None => tracing::debug!("glyph batch uploaded without an atlas; skipping"),
            }
        }
    }

    /// Render the uploaded batches into an offscreen target and read
    /// the pixels back as tightly packed RGBA8 rows.
    pub fn render_offscreen(
        &self,
        width: u32,
        height: u32,
        clear: wgpu::Color,
        sprite_texture: Option<&GpuTexture>,
        glyph_atlas: Option<&GpuTexture>,
    ) -> Result<Vec<u8>, RendererError> {
        let target = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("brix Offscreen Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.texture_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());

        // Rows are padded to wgpu's 256-byte copy alignment, then
        // repacked tightly below.
        let bytes_per_row = (width * 4 + 255) & !255;
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("brix Readback Buffer"),
            size: (bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("brix Offscreen Encoder"),
            });
        self.render(&mut encoder, &view, Some(clear), sprite_texture, glyph_atlas);

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &readback,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| RendererError::Readback(e.to_string()))?
            .map_err(|e| RendererError::Readback(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * bytes_per_row) as usize;
            pixels.extend_from_slice(&data[row_start..row_start + (width * 4) as usize]);
        }
        drop(data);
        readback.unmap();

        Ok(pixels)
    }
}
