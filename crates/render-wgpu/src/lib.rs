//! wgpu render backend for the terrain sandbox.
//!
//! Draws any number of uploaded meshes (terrain chunks, OBJ models) with one
//! Phong-lit pipeline. The camera is a free-fly camera driven by
//! [`vista_input::Action`]s.
//!
//! # Invariants
//! - Uploaded meshes are copied to GPU buffers; the source `MeshData` is never modified.
//! - The camera basis stays orthonormal under any sequence of rotations.
//! - Matrices are right-handed and column-major with clip depth in `[0, 1]`.

mod camera;
mod gpu;
mod shaders;

pub use camera::{CameraPose, FlyCamera};
pub use gpu::TerrainRenderer;
