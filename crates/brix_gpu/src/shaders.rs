//! WGSL programs for the brix fragment pipeline
//!
//! Each shader is a one-for-one translation of the corresponding
//! `brix_core` functions; the CPU crate is the reference for every
//! boundary decision here. Three programs exist, selected per draw call
//! by the renderer:
//!
//! - [`BLOCK_SHADER`] — bordered, rounded rectangles (no texture)
//! - [`GLYPH_SHADER`] — SDF text coverage from a distance-field atlas
//! - [`SPRITE_SHADER`] — the plain textured-quad baseline
//!
//! The block material's membership tests are built on `step`, which is
//! edge-inclusive (`step(e, x) = 1.0` iff `x >= e`); the strict
//! "outside the rounding circle" comparison is therefore written as
//! `1.0 - step(d, r)`. Changing either form changes which pixel
//! row/column belongs to a band or corner.

/// Shader for the block material.
///
/// The vertex stage applies the combined matrix to the 2-D object-space
/// position and passes every other attribute through. Border widths,
/// border colors, and corner radii are per-primitive constants, so they
/// cross the rasterizer with `@interpolate(flat)`.
pub const BLOCK_SHADER: &str = r#"
// ============================================================================
// brix block shader
// ============================================================================

struct TransformUniforms {
    transform: mat4x4<f32>,
}

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) border_widths: vec4<f32>,
    @location(4) border_color_top: vec4<f32>,
    @location(5) border_color_right: vec4<f32>,
    @location(6) border_color_bottom: vec4<f32>,
    @location(7) border_color_left: vec4<f32>,
    @location(8) corner_radius: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) @interpolate(flat) border_widths: vec4<f32>,
    @location(3) @interpolate(flat) border_color_top: vec4<f32>,
    @location(4) @interpolate(flat) border_color_right: vec4<f32>,
    @location(5) @interpolate(flat) border_color_bottom: vec4<f32>,
    @location(6) @interpolate(flat) border_color_left: vec4<f32>,
    @location(7) @interpolate(flat) corner_radius: vec4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: TransformUniforms;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.position = uniforms.transform * vec4<f32>(in.position, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;
    out.border_widths = in.border_widths;
    out.border_color_top = in.border_color_top;
    out.border_color_right = in.border_color_right;
    out.border_color_bottom = in.border_color_bottom;
    out.border_color_left = in.border_color_left;
    out.corner_radius = in.corner_radius;
    return out;
}

// Border bands. Widths are (top, right, bottom, left); each membership
// test is edge-inclusive. Bands blend transparent-up in paint order, so
// left paints last and wins every overlap; a zero-alpha edge color
// disables its band.
fn resolve_border(
    uv: vec2<f32>,
    widths: vec4<f32>,
    top: vec4<f32>,
    right: vec4<f32>,
    bottom: vec4<f32>,
    left: vec4<f32>,
) -> vec4<f32> {
    var resolved = vec4<f32>(0.0);
    resolved = mix(resolved, top, step(uv.y, widths.x) * top.a);
    resolved = mix(resolved, right, step(1.0 - uv.x, widths.y) * right.a);
    resolved = mix(resolved, bottom, step(1.0 - uv.y, widths.z) * bottom.a);
    resolved = mix(resolved, left, step(uv.x, widths.w) * left.a);
    return resolved;
}

// One corner's hide factor: strictly outside the rounding circle
// (1.0 - step(d, r)) and inside the corner's quadrant (inclusive on
// both axes). side_u/side_v are the distances to the corner's own edges.
fn corner_hidden(d: f32, r: f32, side_u: f32, side_v: f32) -> f32 {
    return (1.0 - step(d, r)) * step(side_u, r) * step(side_v, r);
}

// Radii are (top-left, top-right, bottom-right, bottom-left). The four
// quadrants are disjoint, so the corners combine multiplicatively with
// no precedence.
fn corner_mask(uv: vec2<f32>, radius: vec4<f32>) -> vec4<f32> {
    var mask = vec4<f32>(1.0);
    let tl = corner_hidden(
        distance(uv, vec2<f32>(radius.x, radius.x)), radius.x, uv.x, uv.y);
    let tr = corner_hidden(
        distance(uv, vec2<f32>(1.0 - radius.y, radius.y)), radius.y, 1.0 - uv.x, uv.y);
    let br = corner_hidden(
        distance(uv, vec2<f32>(1.0 - radius.z, 1.0 - radius.z)), radius.z, 1.0 - uv.x, 1.0 - uv.y);
    let bl = corner_hidden(
        distance(uv, vec2<f32>(radius.w, 1.0 - radius.w)), radius.w, uv.x, 1.0 - uv.y);
    mask = mask * (1.0 - tl);
    mask = mask * (1.0 - tr);
    mask = mask * (1.0 - br);
    mask = mask * (1.0 - bl);
    return mask;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let border = resolve_border(
        in.uv,
        in.border_widths,
        in.border_color_top,
        in.border_color_right,
        in.border_color_bottom,
        in.border_color_left,
    );
    let mask = corner_mask(in.uv, in.corner_radius);
    return mix(in.color, border, border.a) * mask;
}
"#;

/// Shader for SDF glyph quads.
///
/// Samples the distance field from the atlas texture's alpha channel and
/// ramps coverage across the 0.5 isocontour. The smoothing half-width is
/// a uniform, not a literal, so the host can tune edge softness.
pub const GLYPH_SHADER: &str = r#"
// ============================================================================
// brix SDF glyph shader
// ============================================================================

struct GlyphUniforms {
    transform: mat4x4<f32>,
    smoothing: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: GlyphUniforms;
@group(1) @binding(0) var glyph_atlas: texture_2d<f32>;
@group(1) @binding(1) var glyph_sampler: sampler;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.position = uniforms.transform * vec4<f32>(in.position, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = textureSample(glyph_atlas, glyph_sampler, in.uv).a;
    let alpha = smoothstep(0.5 - uniforms.smoothing, 0.5 + uniforms.smoothing, dist);
    return vec4<f32>(in.color.rgb, in.color.a * alpha);
}
"#;

/// Shader for plain textured quads: vertex color × texture sample, no
/// branching, no special cases.
pub const SPRITE_SHADER: &str = r#"
// ============================================================================
// brix sprite shader
// ============================================================================

struct TransformUniforms {
    transform: mat4x4<f32>,
}

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: TransformUniforms;
@group(1) @binding(0) var sprite_texture: texture_2d<f32>;
@group(1) @binding(1) var sprite_sampler: sampler;

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.position = uniforms.transform * vec4<f32>(in.position, 0.0, 1.0);
    out.uv = in.uv;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color * textureSample(sprite_texture, sprite_sampler, in.uv);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) {
        let module = naga::front::wgsl::parse_str(source).expect("WGSL parse failed");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("WGSL validation failed");
    }

    #[test]
    fn test_block_shader_is_valid_wgsl() {
        validate(BLOCK_SHADER);
    }

    #[test]
    fn test_glyph_shader_is_valid_wgsl() {
        validate(GLYPH_SHADER);
    }

    #[test]
    fn test_sprite_shader_is_valid_wgsl() {
        validate(SPRITE_SHADER);
    }

    #[test]
    fn test_shaders_declare_both_entry_points() {
        for source in [BLOCK_SHADER, GLYPH_SHADER, SPRITE_SHADER] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
    }
}
