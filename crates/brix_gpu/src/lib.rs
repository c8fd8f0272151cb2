//! brix GPU renderer
//!
//! The wgpu translation of the `brix_core` fragment programs:
//!
//! - **Block**: bordered, per-corner-rounded rectangles with flat
//!   per-primitive style attributes
//! - **Glyph**: SDF text coverage with a configurable smoothing uniform
//! - **Sprite**: the plain textured-quad baseline
//!
//! `brix_core` is the behavioral reference; the WGSL in [`shaders`]
//! mirrors it operation for operation, down to the boundary inclusivity
//! of every band and corner test. The renderer runs one pass per frame,
//! drawing whichever of the three batches were uploaded, under the
//! combined matrix bound once per draw call.

pub mod batch;
pub mod renderer;
pub mod shaders;
pub mod texture;
pub mod vertex;

pub use batch::{BlockBatch, BlockProps, QuadBatch};
pub use brix_core::{
    BlockStyle, Color, CornerRadius, EdgeColors, EdgeWidths, GlyphShading, Mat4,
};
pub use renderer::{Renderer, RendererConfig, RendererError};
pub use shaders::{BLOCK_SHADER, GLYPH_SHADER, SPRITE_SHADER};
pub use texture::GpuTexture;
pub use vertex::{BlockVertex, GlyphUniforms, QuadVertex, TransformUniforms};
