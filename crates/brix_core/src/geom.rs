//! Minimal geometry for the transform stage
//!
//! The vertex contract is a single combined matrix applied to a 2-D
//! object-space position: `clip = M × (x, y, 0, 1)`. Everything else a
//! vertex carries is passed through untouched, so this module only needs
//! a column-major 4×4 matrix and a 2-D vector.

/// A 2-D vector / point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vec2) -> f32 {
        Vec2::new(self.x - other.x, self.y - other.y).length()
    }
}

/// A column-major 4×4 matrix.
///
/// `cols[3]` holds the translation, matching WGSL's `mat4x4<f32>`
/// construction from column vectors, so `cols` can be handed to a GPU
/// uniform without reshuffling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// An orthographic projection for 2-D screen-space content: maps the
    /// rectangle `[x, x + width] × [y, y + height]` (y growing downward)
    /// to clip space, flipping y so the rectangle's top edge lands at
    /// clip `+1`.
    ///
    /// A block batch combines this with a caller-supplied model
    /// transform to produce the single matrix the vertex stage consumes.
    pub fn orthographic_2d(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            cols: [
                [2.0 / width, 0.0, 0.0, 0.0],
                [0.0, -2.0 / height, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [-2.0 * x / width - 1.0, 2.0 * y / height + 1.0, 0.0, 1.0],
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Matrix product `self × other`.
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut cols = [[0.0f32; 4]; 4];
        for (j, col) in cols.iter_mut().enumerate() {
            for (i, out) in col.iter_mut().enumerate() {
                for k in 0..4 {
                    *out += self.cols[k][i] * other.cols[j][k];
                }
            }
        }
        Mat4 { cols }
    }

    /// The transform-stage contract: `self × (x, y, 0, 1)`.
    pub fn transform_point(&self, x: f32, y: f32) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (i, out_i) in out.iter_mut().enumerate() {
            *out_i = self.cols[0][i] * x + self.cols[1][i] * y + self.cols[3][i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_identity_passes_position_through() {
        let p = Mat4::IDENTITY.transform_point(3.5, -2.0);
        assert_eq!(p, [3.5, -2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_orthographic_corners() {
        let m = Mat4::orthographic_2d(0.0, 0.0, 800.0, 600.0);
        let tl = m.transform_point(0.0, 0.0);
        assert_close(tl[0], -1.0);
        assert_close(tl[1], 1.0);
        let br = m.transform_point(800.0, 600.0);
        assert_close(br[0], 1.0);
        assert_close(br[1], -1.0);
        let center = m.transform_point(400.0, 300.0);
        assert_close(center[0], 0.0);
        assert_close(center[1], 0.0);
    }

    #[test]
    fn test_mul_with_identity() {
        let m = Mat4::orthographic_2d(0.0, 0.0, 100.0, 100.0);
        assert_eq!(m.mul(&Mat4::IDENTITY), m);
        assert_eq!(Mat4::IDENTITY.mul(&m), m);
    }

    #[test]
    fn test_combined_projection_and_translation() {
        // Translating by (10, 20) in screen space before projecting must
        // equal projecting the translated point.
        let proj = Mat4::orthographic_2d(0.0, 0.0, 200.0, 100.0);
        let model = Mat4::translation(10.0, 20.0, 0.0);
        let combined = proj.mul(&model);
        let a = combined.transform_point(5.0, 5.0);
        let b = proj.transform_point(15.0, 25.0);
        for i in 0..4 {
            assert_close(a[i], b[i]);
        }
    }

    #[test]
    fn test_vec2_distance() {
        let d = Vec2::new(0.05, 0.05).distance(Vec2::new(0.2, 0.2));
        assert_close(d, (2.0f32).sqrt() * 0.15);
    }
}
