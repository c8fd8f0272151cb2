//! brix shading core
//!
//! The CPU reference implementation of brix's fragment programs: pure
//! functions from per-fragment inputs to an output color, with no GPU
//! dependency. The WGSL shaders in `brix_gpu` are a one-for-one
//! translation of this crate and are tested against it.
//!
//! # Programs
//!
//! - **Block** ([`block`]): bordered, per-corner-rounded rectangles —
//!   border band resolution with a fixed paint order, hard rounded-corner
//!   masking, and border-over-fill compositing
//! - **Glyph** ([`glyph`]): signed-distance-field text coverage via a
//!   configurable smoothstep ramp
//! - **Sprite** ([`sprite`]): the plain textured-quad baseline
//!
//! Per-vertex data goes through the transform stage
//! ([`Mat4::transform_point`]) unchanged except for position; per-quad
//! style lives in [`BlockStyle`], the CPU analog of the GPU's flat
//! attributes. [`raster`] evaluates any of the programs over a pixel
//! grid for reference output.
//!
//! Every program is a pure function: no state, no failure path, no
//! clamping of out-of-range inputs. Malformed style values (widths or
//! radii past 0.5) produce the documented overlap behavior, not errors.

pub mod block;
pub mod color;
pub mod geom;
pub mod glyph;
pub mod math;
pub mod raster;
pub mod sprite;

pub use block::{BlockStyle, Corner, CornerRadius, Edge, EdgeColors, EdgeWidths};
pub use color::Color;
pub use geom::{Mat4, Vec2};
pub use glyph::{GlyphShading, DEFAULT_SMOOTHING};
pub use raster::{Bitmap, TextureSampler};
