use serde::{Deserialize, Serialize};
use vista_common::ChunkCoord;
use vista_math::Vec3;

/// Elevation samples for one chunk in a single flat, row-major buffer.
///
/// Rows are indexed by `x` and columns by `z`: sample `(x, z)` lives at
/// `x * depth + z`. The mesh deriver uses the same index for vertex ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heightfield {
    coord: ChunkCoord,
    width: usize,
    depth: usize,
    samples: Vec<f32>,
}

impl Heightfield {
    /// Build a heightfield by evaluating `f(x, z)` for every sample.
    pub fn from_fn(
        coord: ChunkCoord,
        width: usize,
        depth: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Self {
        let mut samples = Vec::with_capacity(width * depth);
        for x in 0..width {
            for z in 0..depth {
                samples.push(f(x, z));
            }
        }
        Self {
            coord,
            width,
            depth,
            samples,
        }
    }

    /// Chunk this heightfield was generated for.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Samples along `x`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Samples along `z`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn index(&self, x: usize, z: usize) -> usize {
        assert!(
            x < self.width && z < self.depth,
            "sample ({x}, {z}) outside {}x{} heightfield",
            self.width,
            self.depth
        );
        x * self.depth + z
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.samples[self.index(x, z)]
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Smallest and largest sample, or `None` when empty.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.samples.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Mean sample value, or `None` when empty.
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    /// World-space translation placing this chunk's mesh next to its neighbours.
    pub fn world_offset(&self) -> Vec3 {
        Vec3::new(
            self.coord.x as f32 * self.width as f32,
            0.0,
            self.coord.y as f32 * self.depth as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_indexing() {
        let field = Heightfield::from_fn(ChunkCoord::default(), 3, 4, |x, z| (x * 10 + z) as f32);
        assert_eq!(field.len(), 12);
        assert_eq!(field.index(1, 2), 6);
        assert_eq!(field.get(2, 3), 23.0);
        assert_eq!(&field.samples()[4..8], &[10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_access_panics() {
        let field = Heightfield::from_fn(ChunkCoord::default(), 2, 2, |_, _| 0.0);
        field.get(2, 0);
    }

    #[test]
    fn statistics() {
        let values = [-0.5, 0.25, 1.0, 0.25];
        let field = Heightfield::from_fn(ChunkCoord::default(), 2, 2, |x, z| values[x * 2 + z]);
        assert_eq!(field.min_max(), Some((-0.5, 1.0)));
        assert_eq!(field.mean(), Some(0.25));

        let empty = Heightfield::from_fn(ChunkCoord::default(), 0, 0, |_, _| 0.0);
        assert!(empty.is_empty());
        assert_eq!(empty.min_max(), None);
        assert_eq!(empty.mean(), None);
    }

    #[test]
    fn world_offset_tiles_chunks() {
        let field = Heightfield::from_fn(ChunkCoord::new(2, -1), 8, 8, |_, _| 0.0);
        assert_eq!(field.world_offset(), Vec3::new(16.0, 0.0, -8.0));
    }
}
