//! Procedural terrain: seeded gradient noise, chunked heightfields, smooth-normal meshes.
//!
//! A request for chunk `(x, y)` builds that chunk's lattice of gradients,
//! accumulates octaves of gradient noise into a heightfield, and the mesh
//! deriver turns the heightfield into positions, normals and triangle indices.
//!
//! # Invariants
//! - Gradients are a pure function of `(seed, ix, iy)`; adjacent chunks share border gradients.
//! - Lattice lookups never leave the chunk's `(chunk_size + 1)²` gradient grid.
//! - Every derived normal is unit length or the `(0, 1, 0)` fallback, never NaN.
//! - Generation holds no shared mutable state; chunks may be built on any thread.

mod config;
mod generator;
mod heightfield;
mod mesh;
pub mod noise;

pub use config::{ConfigError, ConfigFileError, Shaping, TerrainConfig};
pub use generator::{TerrainError, TerrainGenerator};
pub use heightfield::Heightfield;
pub use mesh::{FALLBACK_NORMAL, derive_mesh};
pub use noise::{GradientGrid, gradient, smooth};

pub fn crate_info() -> &'static str {
    "vista-terrain v0.1.0"
}
