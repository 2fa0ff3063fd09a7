use glam::{Mat4, Vec3};

use crate::vector::radians;

/// Translation by `offset`.
pub fn translate(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Rotation of `angle` degrees about `axis`. A zero axis yields identity.
pub fn rotate(angle: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, radians(angle)),
        None => Mat4::IDENTITY,
    }
}

/// Perspective projection with a vertical field of view in degrees.
///
/// Right-handed: the camera looks down `-Z` and depth lands in `[0, 1]`.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(radians(fov), aspect, near, far)
}

/// View matrix placing `eye` at the origin looking toward `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, target, up)
}
