use glam::{Quat, Vec3};

use crate::vector::radians;

/// Rotation of `angle` degrees about `axis`. A zero axis yields identity.
pub fn axis_angle(axis: Vec3, angle: f32) -> Quat {
    match axis.try_normalize() {
        Some(axis) => Quat::from_axis_angle(axis, radians(angle)),
        None => Quat::IDENTITY,
    }
}

/// Unit quaternion, or the zero quaternion when the magnitude is zero.
pub fn normalize_quat(q: Quat) -> Quat {
    let len = q.length();
    if len == 0.0 || !len.is_finite() {
        return Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
    }
    q / len
}

/// Negates the vector part.
pub fn conjugate(q: Quat) -> Quat {
    q.conjugate()
}

/// Rotates `v` by `q` as the sandwich product `q * v * q*`.
///
/// `q` is expected to be unit length; the product is taken explicitly so a
/// slightly denormalized camera quaternion behaves the same as on the CPU
/// reference path.
pub fn rotate_vec3(q: Quat, v: Vec3) -> Vec3 {
    let pure = Quat::from_xyzw(v.x, v.y, v.z, 0.0);
    let r = q * pure * q.conjugate();
    Vec3::new(r.x, r.y, r.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn axis_angle_is_unit() {
        let q = axis_angle(Vec3::new(1.0, 1.0, 0.0), 60.0);
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let q = axis_angle(Vec3::Y, 90.0);
        assert!(approx(rotate_vec3(q, Vec3::X), -Vec3::Z));
        assert!(approx(rotate_vec3(q, Vec3::Z), Vec3::X));
    }

    #[test]
    fn sandwich_matches_glam_rotation() {
        let q = axis_angle(Vec3::new(0.3, -1.0, 0.2), 37.0);
        let v = Vec3::new(1.5, -2.0, 0.25);
        assert!(approx(rotate_vec3(q, v), q * v));
    }

    #[test]
    fn hamilton_product_composes() {
        let yaw = axis_angle(Vec3::Y, 90.0);
        let pitch = axis_angle(Vec3::X, 90.0);
        let both = yaw * pitch;
        let v = Vec3::Z;
        assert!(approx(rotate_vec3(both, v), rotate_vec3(yaw, rotate_vec3(pitch, v))));
    }

    #[test]
    fn conjugate_undoes_rotation() {
        let q = axis_angle(Vec3::Z, 25.0);
        let v = Vec3::new(2.0, 1.0, 0.0);
        assert!(approx(rotate_vec3(conjugate(q), rotate_vec3(q, v)), v));
    }

    #[test]
    fn normalize_zero_quat_is_zero() {
        let z = normalize_quat(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(z.length(), 0.0);
        let n = normalize_quat(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0));
        assert_eq!(n, Quat::IDENTITY);
    }
}
