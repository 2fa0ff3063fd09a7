//! Seeded lattice gradients and the interpolation used to blend them.

use vista_math::Vec2;

/// `π / 2^31`: maps a 32-bit hash linearly onto `[0, 2π)`.
const HASH_TO_ANGLE: f64 = std::f64::consts::PI / 2_147_483_648.0;

/// Unit gradient for lattice point `(ix, iy)` under `seed`.
///
/// Integer hash with odd-prime multiplicative mixing and a half-word rotation
/// between the two halves. All arithmetic is 32-bit modular.
pub fn gradient(seed: u32, ix: i32, iy: i32) -> Vec2 {
    let mut a = ix as u32;
    let mut b = iy as u32;

    a ^= seed;
    a = a.wrapping_mul(3_284_157_443);

    b ^= seed;
    b ^= a.rotate_left(16);
    b = b.wrapping_mul(1_911_520_717);

    a ^= b.rotate_left(16);
    a = a.wrapping_mul(2_048_419_325);

    let angle = (f64::from(a) * HASH_TO_ANGLE) as f32;
    Vec2::new(angle.sin(), angle.cos())
}

/// Cubic (smoothstep) blend between `a0` and `a1` with weight `w` in `[0, 1]`.
pub fn smooth(a0: f32, a1: f32, w: f32) -> f32 {
    (a1 - a0) * (3.0 - w * 2.0) * w * w + a0
}

/// The `(chunk_size + 1)²` lattice gradients covering one chunk.
///
/// Local point `(lx, ly)` holds the gradient of world lattice point
/// `(origin_x + lx, origin_y + ly)`, so the last column of one chunk is the
/// first column of its neighbour.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientGrid {
    side: usize,
    gradients: Vec<Vec2>,
}

impl GradientGrid {
    /// Build the grid whose local `(0, 0)` sits at world lattice `origin`.
    ///
    /// The caller guarantees `origin + cells` fits in `i32`.
    pub fn build(seed: u32, origin: (i32, i32), cells: u32) -> Self {
        let side = cells as usize + 1;
        let mut gradients = Vec::with_capacity(side * side);
        for lx in 0..=cells as i32 {
            for ly in 0..=cells as i32 {
                gradients.push(gradient(seed, origin.0 + lx, origin.1 + ly));
            }
        }
        Self { side, gradients }
    }

    /// Lattice points per side (`chunk_size + 1`).
    pub fn side(&self) -> usize {
        self.side
    }

    /// Lattice cells per side (`chunk_size`).
    pub fn cells(&self) -> usize {
        self.side - 1
    }

    pub fn get(&self, lx: usize, ly: usize) -> Vec2 {
        debug_assert!(lx < self.side && ly < self.side, "lattice index out of grid");
        self.gradients[lx * self.side + ly]
    }

    /// Gradient noise at `p`, in lattice units relative to the grid origin.
    ///
    /// `p` must lie in `[0, cells]` on both axes; points on the far edge are
    /// evaluated in the last cell.
    pub fn sample(&self, p: Vec2) -> f32 {
        let last = self.cells() - 1;
        let x0 = (p.x.floor() as usize).min(last);
        let y0 = (p.y.floor() as usize).min(last);
        let (x1, y1) = (x0 + 1, y0 + 1);

        let corner = |cx: usize, cy: usize| (p - Vec2::new(cx as f32, cy as f32)).dot(self.get(cx, cy));

        let wx = p.x - x0 as f32;
        let wy = p.y - y0 as f32;
        let ix0 = smooth(corner(x0, y0), corner(x1, y0), wx);
        let ix1 = smooth(corner(x0, y1), corner(x1, y1), wx);
        smooth(ix0, ix1, wy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_is_deterministic() {
        for &(seed, x, y) in &[(0, 0, 0), (42, -7, 13), (u32::MAX, i32::MIN, i32::MAX)] {
            let a = gradient(seed, x, y);
            let b = gradient(seed, x, y);
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn gradient_is_unit_length() {
        for ix in -20..20 {
            for iy in -20..20 {
                let g = gradient(1234, ix, iy);
                assert!((g.length() - 1.0).abs() < 1e-5, "({ix}, {iy}) -> {g}");
            }
        }
    }

    #[test]
    fn gradient_depends_on_seed_and_position() {
        assert_ne!(gradient(0, 1, 2), gradient(1, 1, 2));
        assert_ne!(gradient(0, 1, 2), gradient(0, 2, 1));
        assert_ne!(gradient(0, 1, 2), gradient(0, 1, 3));
    }

    #[test]
    fn gradient_origin_under_zero_seed() {
        // Every mixing step maps zero to zero, so the angle is 0.
        assert_eq!(gradient(0, 0, 0), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn smooth_endpoints_and_midpoint() {
        assert_eq!(smooth(2.0, 5.0, 0.0), 2.0);
        assert_eq!(smooth(2.0, 5.0, 1.0), 5.0);
        assert_eq!(smooth(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn grid_matches_direct_gradients() {
        let grid = GradientGrid::build(9, (-4, 8), 4);
        assert_eq!(grid.side(), 5);
        assert_eq!(grid.cells(), 4);
        for lx in 0..5 {
            for ly in 0..5 {
                assert_eq!(grid.get(lx, ly), gradient(9, -4 + lx as i32, 8 + ly as i32));
            }
        }
    }

    #[test]
    fn sample_is_zero_on_lattice_points() {
        let grid = GradientGrid::build(5, (0, 0), 3);
        for x in 0..=3 {
            for y in 0..=3 {
                let v = grid.sample(Vec2::new(x as f32, y as f32));
                assert!(v.abs() < 1e-6, "({x}, {y}) -> {v}");
            }
        }
    }

    #[test]
    fn sample_stays_within_gradient_noise_bound() {
        let grid = GradientGrid::build(77, (3, -3), 4);
        for i in 0..40 {
            for j in 0..40 {
                let p = Vec2::new(i as f32 * 0.1, j as f32 * 0.1);
                assert!(grid.sample(p).abs() <= std::f32::consts::FRAC_1_SQRT_2 + 1e-5);
            }
        }
    }
}
