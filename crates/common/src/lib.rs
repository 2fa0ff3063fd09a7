//! Shared types passed between terrain generation, asset loading and rendering.
//!
//! # Invariants
//! - Mesh buffers are flat: 3 floats per position, 3 per normal, 3 indices per triangle.
//! - A validated mesh never references a vertex it does not contain.
//! - Chunk squares never wrap around the `i32` grid; out-of-range neighbours are an error.

mod mesh;
mod types;

pub use mesh::{MeshData, MeshError};
pub use types::{ChunkCoord, MAX_REGION_RADIUS, RegionError};
