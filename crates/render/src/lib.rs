//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read meshes, they never modify them.
//! - Frame output derives only from the scene, the view and the lighting.
//!
//! The GPU backend lives in `vista-render-wgpu`; [`DebugTextRenderer`]
//! implements the same trait for the CLI and for tests.

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{Lighting, Scene, SceneObject};

pub fn crate_info() -> &'static str {
    "vista-render v0.1.0"
}
