//! Quad batching
//!
//! Collects styled blocks and textured quads into vertex/index vectors
//! for a single upload and draw per program. Every quad becomes 4
//! vertices and 6 indices in the fixed `(0,1,2)(2,3,0)` topology; the
//! external pipeline decides which program draws which batch.

use brix_core::{BlockStyle, Color};

use crate::vertex::{BlockVertex, QuadVertex};

/// Everything needed to place one block: geometry per draw, style per
/// primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockProps {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fill color per corner (top-left, top-right, bottom-right,
    /// bottom-left); interpolated across the quad.
    pub colors: [Color; 4],
    pub scale: [f32; 2],
    /// Rotation in radians, clockwise, about the quad center.
    pub rotation: f32,
    pub style: BlockStyle,
}

impl Default for BlockProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            colors: [Color::WHITE; 4],
            scale: [1.0, 1.0],
            rotation: 0.0,
            style: BlockStyle::default(),
        }
    }
}

impl BlockProps {
    /// Axis-aligned block at `(x, y)` with a uniform fill.
    pub fn new(x: f32, y: f32, width: f32, height: f32, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            colors: [fill; 4],
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: BlockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = [sx, sy];
        self
    }
}

/// The four corner positions of a quad, in emit order: top-left,
/// bottom-left, bottom-right, top-right.
fn quad_corners(x: f32, y: f32, w: f32, h: f32, rotation: f32) -> [[f32; 2]; 4] {
    let corners = [[x, y], [x, y + h], [x + w, y + h], [x + w, y]];
    if rotation == 0.0 {
        return corners;
    }
    // Pivot on the quad center so rotation -> 0 degenerates to the
    // unrotated quad.
    let (cx, cy) = (x + w / 2.0, y + h / 2.0);
    let (sin, cos) = rotation.sin_cos();
    corners.map(|[px, py]| {
        let (dx, dy) = (px - cx, py - cy);
        [cx + cos * dx - sin * dy, cy + sin * dx + cos * dy]
    })
}

/// Batched block collection for the block program.
#[derive(Clone, Debug, Default)]
pub struct BlockBatch {
    pub vertices: Vec<BlockVertex>,
    pub indices: Vec<u32>,
}

impl BlockBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one block as 4 vertices and 6 indices.
    pub fn push(&mut self, props: &BlockProps) {
        let w = props.width * props.scale[0];
        let h = props.height * props.scale[1];
        let [tl, bl, br, tr] = quad_corners(props.x, props.y, w, h, props.rotation);
        let [c_tl, c_tr, c_br, c_bl] = props.colors;

        let base = self.vertices.len() as u32;
        self.vertices.push(BlockVertex::new(tl, [0.0, 0.0], c_tl, &props.style));
        self.vertices.push(BlockVertex::new(bl, [0.0, 1.0], c_bl, &props.style));
        self.vertices.push(BlockVertex::new(br, [1.0, 1.0], c_br, &props.style));
        self.vertices.push(BlockVertex::new(tr, [1.0, 0.0], c_tr, &props.style));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// Batched textured quads, shared by the sprite and glyph programs.
///
/// UV coordinates address the bound texture directly, so a quad can map
/// a sub-region (an atlas cell) rather than the whole texture.
#[derive(Clone, Debug, Default)]
pub struct QuadBatch {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one quad mapping the texture region `uv_min..uv_max`.
    pub fn push(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        uv_min: [f32; 2],
        uv_max: [f32; 2],
        color: Color,
    ) {
        let base = self.vertices.len() as u32;
        self.vertices
            .push(QuadVertex::new([x, y], uv_min, color));
        self.vertices
            .push(QuadVertex::new([x, y + height], [uv_min[0], uv_max[1]], color));
        self.vertices
            .push(QuadVertex::new([x + width, y + height], uv_max, color));
        self.vertices
            .push(QuadVertex::new([x + width, y], [uv_max[0], uv_min[1]], color));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    /// Append one quad mapping the whole texture.
    pub fn push_full(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.push(x, y, width, height, [0.0, 0.0], [1.0, 1.0], color);
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}
