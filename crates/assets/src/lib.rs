//! Asset loading: Wavefront OBJ models into renderable mesh buffers.
//!
//! The renderer consumes [`vista_common::MeshData`]; this crate is the only
//! place that knows about file formats.
//!
//! # Invariants
//! - Identical `(position, uv, normal)` corners share one vertex; no tolerance merging.
//! - A loaded mesh always passes [`vista_common::MeshData::validate`].

pub mod obj;

pub use obj::{ObjError, ObjModel, load_obj, parse_obj};

pub fn crate_info() -> &'static str {
    "vista-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }
}
