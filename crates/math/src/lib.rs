//! Linear algebra for the sandbox: vectors, 4x4 matrices, quaternions.
//!
//! The value types are glam's. This crate pins down the conventions the rest
//! of the workspace relies on and adds the degree-based constructors used by
//! the camera, the terrain draw and model placement.
//!
//! # Invariants
//! - One convention everywhere: right-handed, column-major, clip depth in `[0, 1]`.
//! - Public angles are degrees unless the name says radians.
//! - Normalizing a zero-length value never produces NaN through these helpers.

mod mat4;
mod quat;
mod vector;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use mat4::{look_at, perspective, rotate, translate};
pub use quat::{axis_angle, conjugate, normalize_quat, rotate_vec3};
pub use vector::{radians, NormalizeOr};

pub fn crate_info() -> &'static str {
    "vista-math v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("math"));
    }
}
