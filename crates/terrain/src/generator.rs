use rayon::prelude::*;
use vista_common::{ChunkCoord, MeshData};
use vista_math::Vec2;

use crate::config::{ConfigError, TerrainConfig};
use crate::heightfield::Heightfield;
use crate::mesh::derive_mesh;
use crate::noise::GradientGrid;

/// Errors from chunk generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("invalid terrain config: {0}")]
    Config(#[from] ConfigError),
    #[error("chunk {coord} lies outside the 32-bit lattice for chunk_size {chunk_size}")]
    ChunkOutOfRange { coord: ChunkCoord, chunk_size: u32 },
}

/// Heightfield generator over an immutable configuration.
///
/// Holds no mutable state, so one generator can serve any number of threads.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Validate `config` and build a generator. Invalid configs fail here,
    /// never later as garbage geometry.
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        tracing::debug!(?config, "terrain generator ready");
        Ok(Self { config })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// World lattice coordinate of the chunk's local `(0, 0)`.
    fn lattice_origin(&self, coord: ChunkCoord) -> Result<(i32, i32), TerrainError> {
        let cells = self.config.chunk_size as i32;
        let axis = |c: i32| {
            c.checked_mul(cells)
                .filter(|origin| origin.checked_add(cells).is_some())
        };
        match (axis(coord.x), axis(coord.y)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(TerrainError::ChunkOutOfRange {
                coord,
                chunk_size: self.config.chunk_size,
            }),
        }
    }

    /// The `(chunk_size + 1)²` lattice gradients used by `coord`.
    pub fn gradient_grid(&self, coord: ChunkCoord) -> Result<GradientGrid, TerrainError> {
        let origin = self.lattice_origin(coord)?;
        Ok(GradientGrid::build(
            self.config.seed,
            origin,
            self.config.chunk_size,
        ))
    }

    /// Generate the heightfield for one chunk.
    ///
    /// Each sample sums `octaves` layers of gradient noise; layer `o` has
    /// amplitude `0.5^o` and frequency `2^o`, and its sample point is the
    /// sub-pixel position divided by `block_size * frequency`, which keeps
    /// every lattice lookup inside the chunk's gradient grid.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Result<Heightfield, TerrainError> {
        let _span = tracing::info_span!("generate_chunk", x = coord.x, y = coord.y).entered();

        let grid = self.gradient_grid(coord)?;
        let side = self.config.samples_per_side();
        let block = self.config.block_size as f32;
        let octaves = self.config.octaves;
        let shaping = self.config.shaping;

        let field = Heightfield::from_fn(coord, side, side, |x, y| {
            let point = Vec2::new(x as f32, y as f32);
            let mut amplitude = 1.0_f32;
            let mut frequency = 1.0_f32;
            let mut value = 0.0_f32;
            for _ in 0..octaves {
                value += grid.sample(point / (block * frequency)) * amplitude;
                amplitude *= 0.5;
                frequency *= 2.0;
            }
            shaping.apply(value)
        });

        if let Some((lo, hi)) = field.min_max() {
            tracing::debug!(samples = field.len(), lo, hi, "chunk generated");
        }
        Ok(field)
    }

    /// Generate a chunk and derive its mesh in one step.
    pub fn chunk_mesh(&self, coord: ChunkCoord) -> Result<MeshData, TerrainError> {
        Ok(derive_mesh(&self.generate_chunk(coord)?))
    }

    /// Generate independent chunks in parallel. Results keep request order.
    pub fn generate_region(
        &self,
        coords: &[ChunkCoord],
    ) -> Result<Vec<Heightfield>, TerrainError> {
        let _span = tracing::info_span!("generate_region", chunks = coords.len()).entered();
        coords
            .par_iter()
            .map(|&coord| self.generate_chunk(coord))
            .collect()
    }
}
