//! Textured quad baseline
//!
//! The degenerate fragment program for plain textured or tinted quads:
//! one channel-wise multiply, no borders, no rounding, no branching.

use crate::color::Color;

/// `vertex color × texture sample`, alpha included.
pub fn shade(color: Color, sample: Color) -> Color {
    color.modulate(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_color_passes_sample_through() {
        let sample = Color::rgba(0.25, 0.5, 0.75, 0.625);
        assert_eq!(shade(Color::WHITE, sample), sample);
    }

    #[test]
    fn test_tint_modulates_every_channel() {
        let tint = Color::rgba(0.5, 0.5, 0.5, 0.5);
        let sample = Color::rgba(1.0, 0.8, 0.6, 1.0);
        let out = shade(tint, sample);
        assert_eq!(out, Color::rgba(0.5, 0.4, 0.3, 0.5));
    }
}
