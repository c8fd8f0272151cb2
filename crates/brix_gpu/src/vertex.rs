//! GPU vertex and uniform layouts
//!
//! `#[repr(C)]` + `bytemuck::Pod` structs matching the shader inputs in
//! [`crate::shaders`] byte for byte, plus their
//! `wgpu::VertexBufferLayout` descriptors.

use brix_core::{BlockStyle, Color, GlyphShading, Mat4};

/// Vertex format for the block material.
///
/// Nine attributes at locations 0–8 (the original block batch's
/// layout). Only position, uv, and color vary per vertex; the border
/// and radius attributes repeat the per-primitive [`BlockStyle`] on all
/// four vertices of a quad and reach the fragment stage flat.
///
/// Field offsets in bytes (all components f32):
/// position(0) uv(8) color(16) border_widths(32) border_color_top(48)
/// border_color_right(64) border_color_bottom(80) border_color_left(96)
/// corner_radius(112); stride 128.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockVertex {
    /// Position in object space.
    pub position: [f32; 2],
    /// Quad-local texture coordinate in [0,1]².
    pub uv: [f32; 2],
    /// Base fill color (RGBA, straight alpha).
    pub color: [f32; 4],
    /// Border widths (top, right, bottom, left), fractions of the quad.
    pub border_widths: [f32; 4],
    pub border_color_top: [f32; 4],
    pub border_color_right: [f32; 4],
    pub border_color_bottom: [f32; 4],
    pub border_color_left: [f32; 4],
    /// Corner radii (top-left, top-right, bottom-right, bottom-left).
    pub corner_radius: [f32; 4],
}

impl BlockVertex {
    pub fn new(position: [f32; 2], uv: [f32; 2], color: Color, style: &BlockStyle) -> Self {
        Self {
            position,
            uv,
            color: color.to_array(),
            border_widths: style.border_widths.to_array(),
            border_color_top: style.border_colors.top.to_array(),
            border_color_right: style.border_colors.right.to_array(),
            border_color_bottom: style.border_colors.bottom.to_array(),
            border_color_left: style.border_colors.left.to_array(),
            corner_radius: style.corner_radius.to_array(),
        }
    }

    /// Vertex buffer layout for wgpu.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const F2: wgpu::VertexFormat = wgpu::VertexFormat::Float32x2;
        const F4: wgpu::VertexFormat = wgpu::VertexFormat::Float32x4;
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BlockVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute { offset: 0, shader_location: 0, format: F2 },
                wgpu::VertexAttribute { offset: 8, shader_location: 1, format: F2 },
                wgpu::VertexAttribute { offset: 16, shader_location: 2, format: F4 },
                wgpu::VertexAttribute { offset: 32, shader_location: 3, format: F4 },
                wgpu::VertexAttribute { offset: 48, shader_location: 4, format: F4 },
                wgpu::VertexAttribute { offset: 64, shader_location: 5, format: F4 },
                wgpu::VertexAttribute { offset: 80, shader_location: 6, format: F4 },
                wgpu::VertexAttribute { offset: 96, shader_location: 7, format: F4 },
                wgpu::VertexAttribute { offset: 112, shader_location: 8, format: F4 },
            ],
        }
    }
}

/// Vertex format shared by the sprite and glyph programs.
///
/// Offsets: position(0) uv(8) color(16); stride 32.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl QuadVertex {
    pub fn new(position: [f32; 2], uv: [f32; 2], color: Color) -> Self {
        Self {
            position,
            uv,
            color: color.to_array(),
        }
    }

    /// Vertex buffer layout for wgpu.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Uniform block for the block and sprite programs: the combined
/// matrix, bound once per draw call. 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniforms {
    pub transform: [[f32; 4]; 4],
}

impl From<Mat4> for TransformUniforms {
    fn from(mat: Mat4) -> Self {
        Self { transform: mat.cols }
    }
}

impl Default for TransformUniforms {
    fn default() -> Self {
        Mat4::IDENTITY.into()
    }
}

/// Uniform block for the glyph program: combined matrix plus the SDF
/// smoothing half-width, with explicit padding to 80 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlyphUniforms {
    pub transform: [[f32; 4]; 4],
    pub smoothing: f32,
    pub _padding: [f32; 3],
}

impl GlyphUniforms {
    pub fn new(mat: Mat4, shading: GlyphShading) -> Self {
        Self {
            transform: mat.cols,
            smoothing: shading.smoothing,
            _padding: [0.0; 3],
        }
    }
}

impl Default for GlyphUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, GlyphShading::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_block_vertex_layout_matches_struct() {
        assert_eq!(mem::size_of::<BlockVertex>(), 128);
        let desc = BlockVertex::desc();
        assert_eq!(desc.array_stride, 128);
        assert_eq!(desc.attributes.len(), 9);
        let last = desc.attributes.last().unwrap();
        assert_eq!(last.offset, 112);
        assert_eq!(last.shader_location, 8);
    }

    #[test]
    fn test_quad_vertex_layout_matches_struct() {
        assert_eq!(mem::size_of::<QuadVertex>(), 32);
        let desc = QuadVertex::desc();
        assert_eq!(desc.array_stride, 32);
        assert_eq!(desc.attributes.len(), 3);
    }

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(mem::size_of::<TransformUniforms>(), 64);
        assert_eq!(mem::size_of::<GlyphUniforms>(), 80);
    }

    #[test]
    fn test_block_vertex_carries_style_flat() {
        use brix_core::{CornerRadius, EdgeColors, EdgeWidths};
        let style = BlockStyle::new()
            .with_borders(EdgeWidths::new(0.1, 0.2, 0.3, 0.4), EdgeColors::uniform(Color::RED))
            .with_corner_radius(CornerRadius::uniform(0.25));
        let v = BlockVertex::new([0.0, 0.0], [0.0, 0.0], Color::WHITE, &style);
        assert_eq!(v.border_widths, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(v.border_color_left, Color::RED.to_array());
        assert_eq!(v.corner_radius, [0.25; 4]);
    }
}
