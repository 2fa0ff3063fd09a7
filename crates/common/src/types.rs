use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest radius accepted by [`ChunkCoord::square`]; a full square is
/// `(2 * radius + 1)²` chunks.
pub const MAX_REGION_RADIUS: u32 = 64;

/// Errors from building a square of chunk coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    #[error("radius {radius} exceeds the limit of {max}", max = MAX_REGION_RADIUS)]
    RadiusTooLarge { radius: u32 },
    #[error("radius {radius} around chunk {center} leaves the 32-bit chunk grid")]
    OutOfRange { center: ChunkCoord, radius: u32 },
}

/// Position of a chunk in the infinite terrain grid.
///
/// Identity is purely positional: two requests for the same coordinate
/// produce identical chunks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// All coordinates within a square radius of `self`, row by row.
    ///
    /// Fails when the radius exceeds [`MAX_REGION_RADIUS`] or any neighbour
    /// would fall outside `i32`.
    pub fn square(self, radius: u32) -> Result<Vec<ChunkCoord>, RegionError> {
        if radius > MAX_REGION_RADIUS {
            return Err(RegionError::RadiusTooLarge { radius });
        }
        let r = radius as i32;
        let (Some(x0), Some(x1), Some(y0), Some(y1)) = (
            self.x.checked_sub(r),
            self.x.checked_add(r),
            self.y.checked_sub(r),
            self.y.checked_add(r),
        ) else {
            return Err(RegionError::OutOfRange {
                center: self,
                radius,
            });
        };

        let side = 2 * radius as usize + 1;
        let mut out = Vec::with_capacity(side * side);
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.push(ChunkCoord::new(x, y));
            }
        }
        Ok(out)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_identity_is_positional() {
        assert_eq!(ChunkCoord::new(1, -2), ChunkCoord::from((1, -2)));
        assert_ne!(ChunkCoord::new(1, -2), ChunkCoord::new(-2, 1));
    }

    #[test]
    fn square_radius() {
        let cells = ChunkCoord::new(0, 0).square(1).unwrap();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], ChunkCoord::new(-1, -1));
        assert_eq!(cells[1], ChunkCoord::new(0, -1));
        assert_eq!(cells[8], ChunkCoord::new(1, 1));
        assert_eq!(
            ChunkCoord::new(5, 5).square(0).unwrap(),
            vec![ChunkCoord::new(5, 5)]
        );
    }

    #[test]
    fn square_at_lattice_edge() {
        for center in [
            ChunkCoord::new(i32::MAX, 0),
            ChunkCoord::new(0, i32::MAX),
            ChunkCoord::new(i32::MIN, 0),
            ChunkCoord::new(0, i32::MIN),
        ] {
            assert_eq!(
                center.square(1),
                Err(RegionError::OutOfRange { center, radius: 1 })
            );
            assert_eq!(center.square(0).unwrap(), vec![center]);
        }

        let inside = ChunkCoord::new(i32::MAX - 1, i32::MIN + 1).square(1).unwrap();
        assert_eq!(inside.len(), 9);
        assert_eq!(inside[0], ChunkCoord::new(i32::MAX - 2, i32::MIN));
        assert_eq!(inside[8], ChunkCoord::new(i32::MAX, i32::MIN + 2));
    }

    #[test]
    fn square_radius_is_capped() {
        let origin = ChunkCoord::default();
        assert_eq!(
            origin.square(MAX_REGION_RADIUS).unwrap().len(),
            (2 * MAX_REGION_RADIUS as usize + 1).pow(2)
        );
        assert_eq!(
            origin.square(MAX_REGION_RADIUS + 1),
            Err(RegionError::RadiusTooLarge {
                radius: MAX_REGION_RADIUS + 1
            })
        );
        assert!(matches!(
            origin.square(u32::MAX),
            Err(RegionError::RadiusTooLarge { .. })
        ));
    }

    #[test]
    fn display_format() {
        assert_eq!(ChunkCoord::new(3, -4).to_string(), "(3, -4)");
    }
}
