use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rejected generator configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk_size must be at least 1")]
    ZeroChunkSize,
    #[error("block_size must be at least 1")]
    ZeroBlockSize,
    #[error("octaves must be at least 1")]
    ZeroOctaves,
    #[error("chunk_size {0} does not fit a signed 32-bit lattice coordinate")]
    ChunkSizeTooLarge(u32),
    #[error(
        "chunk of {block_size}x{chunk_size} samples per side exceeds the 32-bit vertex index range"
    )]
    ChunkTooLarge { chunk_size: u32, block_size: u32 },
    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScale(f32),
}

/// Errors from reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension {0:?} (expected .yaml, .yml or .json)")]
    UnknownExtension(String),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Final per-sample output step applied after octave accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Shaping {
    /// Clamp every sample into `[-1, 1]`.
    #[default]
    Clamp,
    /// Leave samples unclamped and multiply by `factor`.
    Scale { factor: f32 },
}

impl Shaping {
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Shaping::Clamp => value.clamp(-1.0, 1.0),
            Shaping::Scale { factor } => value * factor,
        }
    }
}

/// Immutable generator configuration, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Noise seed.
    pub seed: u32,
    /// Lattice cells per chunk side.
    pub chunk_size: u32,
    /// Samples per lattice cell side.
    pub block_size: u32,
    /// Number of noise layers accumulated per sample.
    pub octaves: u32,
    pub shaping: Shaping,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_size: 200,
            block_size: 1,
            octaves: 8,
            shaping: Shaping::Clamp,
        }
    }
}

impl TerrainConfig {
    /// Samples per heightfield side: `block_size * chunk_size`.
    pub fn samples_per_side(&self) -> usize {
        self.block_size as usize * self.chunk_size as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        if i32::try_from(self.chunk_size).is_err() {
            return Err(ConfigError::ChunkSizeTooLarge(self.chunk_size));
        }
        let vertices = (self.samples_per_side() as u64).checked_mul(self.samples_per_side() as u64);
        if !matches!(vertices, Some(v) if v <= u64::from(u32::MAX)) {
            return Err(ConfigError::ChunkTooLarge {
                chunk_size: self.chunk_size,
                block_size: self.block_size,
            });
        }
        if let Shaping::Scale { factor } = self.shaping {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::InvalidScale(factor));
            }
        }
        Ok(())
    }

    /// Load and validate a config from a `.yaml`/`.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config: TerrainConfig = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            _ => return Err(ConfigFileError::UnknownExtension(ext)),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded terrain config");
        Ok(config)
    }
}
