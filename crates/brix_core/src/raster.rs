//! Software reference rasterizer
//!
//! Evaluates the fragment programs over a pixel grid, one invocation per
//! texel center, exactly as the GPU's fragment stage would for a quad
//! covering the whole target. This is the CPU-testable reference the
//! WGSL translation is held to; it is not a performance path.

use crate::block::BlockStyle;
use crate::color::Color;
use crate::glyph::GlyphShading;
use crate::{block, sprite};

/// Source of texture samples for the glyph and sprite programs, standing
/// in for the GPU's bound sampler.
pub trait TextureSampler {
    /// Sample at normalized `(u, v) ∈ [0,1]²`.
    fn sample(&self, u: f32, v: f32) -> Color;
}

/// A small owned pixel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// A transparent bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Normalized coordinate of a texel center.
    fn texel_center(&self, x: u32, y: u32) -> (f32, f32) {
        (
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        )
    }
}

impl TextureSampler for Bitmap {
    /// Nearest-neighbor sampling, clamped to the edge texels.
    fn sample(&self, u: f32, v: f32) -> Color {
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as u32;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as u32;
        self.pixel(x, y)
    }
}

fn render(width: u32, height: u32, mut fragment: impl FnMut(f32, f32) -> Color) -> Bitmap {
    let mut out = Bitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let (u, v) = out.texel_center(x, y);
            let color = fragment(u, v);
            out.set_pixel(x, y, color);
        }
    }
    out
}

/// Rasterize one block covering the whole grid.
pub fn render_block(base: Color, style: &BlockStyle, width: u32, height: u32) -> Bitmap {
    tracing::debug!(width, height, "rasterizing block reference");
    render(width, height, |u, v| block::shade(u, v, base, style))
}

/// Rasterize one glyph quad from a distance-field texture.
pub fn render_glyph(
    field: &dyn TextureSampler,
    color: Color,
    shading: GlyphShading,
    width: u32,
    height: u32,
) -> Bitmap {
    tracing::debug!(width, height, "rasterizing glyph reference");
    render(width, height, |u, v| {
        shading.shade(color, field.sample(u, v).a)
    })
}

/// Rasterize one textured quad.
pub fn render_sprite(
    texture: &dyn TextureSampler,
    tint: Color,
    width: u32,
    height: u32,
) -> Bitmap {
    tracing::debug!(width, height, "rasterizing sprite reference");
    render(width, height, |u, v| sprite::shade(tint, texture.sample(u, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{CornerRadius, EdgeColors, EdgeWidths};

    const BASE: Color = Color::rgba(0.2, 0.4, 0.6, 1.0);

    #[test]
    fn test_plain_block_fills_every_pixel() {
        let out = render_block(BASE, &BlockStyle::default(), 4, 4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), BASE);
            }
        }
    }

    #[test]
    fn test_rounded_block_cuts_corner_pixels() {
        let style = BlockStyle::new().with_corner_radius(CornerRadius::uniform(0.25));
        let out = render_block(BASE, &style, 8, 8);
        // (0, 0) has center (0.0625, 0.0625): distance to the top-left
        // circle center (0.25, 0.25) is ~0.265 > 0.25.
        assert_eq!(out.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(out.pixel(7, 0), Color::TRANSPARENT);
        assert_eq!(out.pixel(7, 7), Color::TRANSPARENT);
        assert_eq!(out.pixel(0, 7), Color::TRANSPARENT);
        // Centers and edge midpoints survive.
        assert_eq!(out.pixel(4, 4), BASE);
        assert_eq!(out.pixel(4, 0), BASE);
        assert_eq!(out.pixel(0, 4), BASE);
    }

    #[test]
    fn test_bordered_block_paints_bands() {
        let style = BlockStyle::new().with_borders(
            EdgeWidths::new(0.25, 0.0, 0.0, 0.0),
            EdgeColors::uniform(Color::RED),
        );
        let out = render_block(BASE, &style, 8, 8);
        // First two rows are inside the 0.25 top band.
        assert_eq!(out.pixel(3, 0), Color::RED);
        assert_eq!(out.pixel(3, 1), Color::RED);
        assert_eq!(out.pixel(3, 2), BASE);
    }

    #[test]
    fn test_sprite_white_tint_reproduces_texture() {
        let mut texture = Bitmap::new(2, 2);
        texture.set_pixel(0, 0, Color::RED);
        texture.set_pixel(1, 0, Color::GREEN);
        texture.set_pixel(0, 1, Color::BLUE);
        texture.set_pixel(1, 1, Color::WHITE);
        let out = render_sprite(&texture, Color::WHITE, 2, 2);
        assert_eq!(out, texture);
    }

    #[test]
    fn test_glyph_ramp_over_field() {
        // A 3x1 field crossing the 0.5 isocontour left to right.
        let mut field = Bitmap::new(3, 1);
        field.set_pixel(0, 0, Color::rgba(0.0, 0.0, 0.0, 0.2));
        field.set_pixel(1, 0, Color::rgba(0.0, 0.0, 0.0, 0.5));
        field.set_pixel(2, 0, Color::rgba(0.0, 0.0, 0.0, 0.9));
        let out = render_glyph(&field, Color::WHITE, GlyphShading::default(), 3, 1);
        assert_eq!(out.pixel(0, 0).a, 0.0);
        assert_eq!(out.pixel(1, 0).a, 0.5);
        assert_eq!(out.pixel(2, 0).a, 1.0);
    }

    #[test]
    fn test_nearest_sampling_clamps_at_edges() {
        let mut texture = Bitmap::new(2, 1);
        texture.set_pixel(0, 0, Color::RED);
        texture.set_pixel(1, 0, Color::GREEN);
        assert_eq!(texture.sample(-0.5, 0.5), Color::RED);
        assert_eq!(texture.sample(1.5, 0.5), Color::GREEN);
        assert_eq!(texture.sample(1.0, 0.5), Color::GREEN);
    }
}
