use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vista_common::ChunkCoord;
use vista_math::{Mat4, Vec3, translate};
use vista_render::{DebugTextRenderer, Lighting, RenderView, Renderer, Scene};
use vista_terrain::{Heightfield, Shaping, TerrainConfig, TerrainGenerator, derive_mesh};

#[derive(Parser)]
#[command(name = "vista-cli", about = "CLI tool for procedural terrain operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Generator settings: an optional YAML/JSON file, then per-field overrides.
#[derive(Args, Debug, Default)]
struct TerrainArgs {
    /// Terrain config file (.yaml, .yml or .json)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u32>,
    /// Lattice cells per chunk side
    #[arg(long)]
    chunk_size: Option<u32>,
    /// Samples per lattice cell
    #[arg(long)]
    block_size: Option<u32>,
    #[arg(long)]
    octaves: Option<u32>,
    /// Leave samples unclamped and multiply them by this factor
    #[arg(long)]
    scale: Option<f32>,
}

impl TerrainArgs {
    fn resolve(&self) -> anyhow::Result<TerrainConfig> {
        let mut config = match &self.config {
            Some(path) => TerrainConfig::from_path(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => TerrainConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(octaves) = self.octaves {
            config.octaves = octaves;
        }
        if let Some(factor) = self.scale {
            config.shaping = Shaping::Scale { factor };
        }
        config.validate()?;
        Ok(config)
    }

    fn generator(&self) -> anyhow::Result<TerrainGenerator> {
        Ok(TerrainGenerator::new(self.resolve()?)?)
    }
}

/// Chunk coordinate flags.
#[derive(Args, Debug, Clone, Copy)]
struct ChunkArgs {
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    x: i32,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    y: i32,
}

impl ChunkArgs {
    fn coord(self) -> ChunkCoord {
        ChunkCoord::new(self.x, self.y)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print the resolved terrain config
    Config {
        #[command(flatten)]
        terrain: TerrainArgs,
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Generate one chunk's heightfield and summarize it
    Chunk {
        #[command(flatten)]
        terrain: TerrainArgs,
        #[command(flatten)]
        chunk: ChunkArgs,
        /// Write the heightfield as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a chunk, derive its mesh and summarize it
    Mesh {
        #[command(flatten)]
        terrain: TerrainArgs,
        #[command(flatten)]
        chunk: ChunkArgs,
        /// Write the mesh as JSON
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print a debug text frame of the mesh
        #[arg(long)]
        render: bool,
    },
    /// Generate a square of chunks in parallel
    Region {
        #[command(flatten)]
        terrain: TerrainArgs,
        #[command(flatten)]
        center: ChunkArgs,
        /// Chunks on each side of the center, at most 64. Chunk meshes do not
        /// share their last sample row, so adjacent meshes leave a one-quad gap.
        #[arg(short, long, default_value = "1")]
        radius: u32,
    },
    /// Load an OBJ model and summarize it
    Obj {
        path: PathBuf,
        /// Print a debug text frame of the model at translate(1, 0, 0)
        #[arg(long)]
        render: bool,
    },
}

fn summarize(field: &Heightfield) {
    let (lo, hi) = field.min_max().unwrap_or((0.0, 0.0));
    println!(
        "chunk {}: {}x{} samples, min={lo:.4} max={hi:.4} mean={:.4}",
        field.coord(),
        field.width(),
        field.depth(),
        field.mean().unwrap_or(0.0)
    );
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    println!("wrote {}", path.display());
    Ok(())
}

/// Camera framing the whole scene from above one corner.
fn overview(scene: &Scene<'_>) -> RenderView {
    match scene.bounds() {
        Some((lo, hi)) => {
            let center = (lo + hi) * 0.5;
            let extent = (hi - lo).length().max(1.0);
            RenderView {
                eye: center + Vec3::new(-0.5, 0.75, -0.5) * extent,
                target: center,
                ..RenderView::default()
            }
        }
        None => RenderView::default(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("vista-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: {}", vista_math::crate_info());
            println!("terrain: {}", vista_terrain::crate_info());
            println!("assets: {}", vista_assets::crate_info());
            println!("render: {}", vista_render::crate_info());
        }
        Commands::Config { terrain, json } => {
            let config = terrain.resolve()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", serde_yaml::to_string(&config)?);
            }
        }
        Commands::Chunk {
            terrain,
            chunk,
            out,
        } => {
            let field = terrain.generator()?.generate_chunk(chunk.coord())?;
            summarize(&field);
            if let Some(path) = out {
                write_json(&path, &field)?;
            }
        }
        Commands::Mesh {
            terrain,
            chunk,
            out,
            render,
        } => {
            let mesh = terrain.generator()?.chunk_mesh(chunk.coord())?;
            mesh.validate()?;
            println!(
                "mesh {}: {} vertices, {} triangles",
                chunk.coord(),
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            if render {
                let mut scene = Scene::new(Lighting::default());
                scene.add("terrain", &mesh, Mat4::IDENTITY);
                print!("{}", DebugTextRenderer::new().render(&scene, &overview(&scene)));
            }
            if let Some(path) = out {
                write_json(&path, &mesh)?;
            }
        }
        Commands::Region {
            terrain,
            center,
            radius,
        } => {
            let generator = terrain.generator()?;
            let coords = center.coord().square(radius)?;
            let fields = generator.generate_region(&coords)?;
            tracing::debug!(chunks = fields.len(), "region generated");
            let mut triangles = 0;
            for field in &fields {
                summarize(field);
                triangles += derive_mesh(field).triangle_count();
            }
            println!("{} chunks, {triangles} triangles", fields.len());
        }
        Commands::Obj { path, render } => {
            let model = vista_assets::load_obj(&path)?;
            model.mesh.validate()?;
            println!(
                "{}: {} vertices, {} triangles",
                path.display(),
                model.mesh.vertex_count(),
                model.mesh.triangle_count()
            );
            if let Some((lo, hi)) = model.mesh.bounds() {
                println!("bounds: {lo} .. {hi}");
            }
            if render {
                let mut scene = Scene::new(Lighting::default());
                scene.add("model", &model.mesh, translate(Vec3::new(1.0, 0.0, 0.0)));
                print!("{}", DebugTextRenderer::new().render(&scene, &overview(&scene)));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_common::RegionError;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "vista-cli", "chunk", "--seed", "7", "--chunk-size", "4", "--x", "-2",
        ])
        .unwrap();
        let Commands::Chunk { terrain, chunk, .. } = cli.command else {
            panic!("expected chunk command");
        };
        let config = terrain.resolve().unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.chunk_size, 4);
        assert_eq!(config.octaves, TerrainConfig::default().octaves);
        assert_eq!(chunk.coord(), ChunkCoord::new(-2, 0));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.yaml");
        std::fs::write(&path, "seed: 3\nchunk_size: 6\nblock_size: 2\noctaves: 2\n").unwrap();
        let args = TerrainArgs {
            config: Some(path),
            octaves: Some(5),
            scale: Some(3.0),
            ..TerrainArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.chunk_size, 6);
        assert_eq!(config.octaves, 5);
        assert_eq!(config.shaping, Shaping::Scale { factor: 3.0 });
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = TerrainArgs {
            block_size: Some(0),
            ..TerrainArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn region_at_lattice_edge_is_an_error() {
        let cli = Cli::try_parse_from([
            "vista-cli", "region", "--x", "2147483647", "--radius", "1",
        ])
        .unwrap();
        let Commands::Region { center, radius, .. } = cli.command else {
            panic!("expected region command");
        };
        assert_eq!(
            center.coord().square(radius),
            Err(RegionError::OutOfRange {
                center: ChunkCoord::new(i32::MAX, 0),
                radius: 1
            })
        );
        assert!(Cli::try_parse_from(["vista-cli", "region", "--radius", "-1"]).is_err());
    }

    #[test]
    fn overview_looks_at_scene_center() {
        let mut mesh = vista_common::MeshData::new();
        mesh.push_vertex(Vec3::ZERO, Vec3::Y);
        mesh.push_vertex(Vec3::new(2.0, 0.0, 2.0), Vec3::Y);
        let mut scene = Scene::default();
        scene.add("m", &mesh, Mat4::IDENTITY);
        let view = overview(&scene);
        assert_eq!(view.target, Vec3::new(1.0, 0.0, 1.0));
        assert!(view.eye.y > 0.0);
    }
}
