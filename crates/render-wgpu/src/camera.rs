use std::fmt;

use vista_input::{Action, Axis};
use vista_math::{Mat4, NormalizeOr, Quat, Vec3, axis_angle, look_at, perspective, rotate_vec3};
use vista_render::RenderView;

/// Free-fly camera with an explicit orthonormal basis.
///
/// Turning rotates `front`, `up` and `right` together by a quaternion, so the
/// camera can roll and loop without gimbal clamps.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// World units per second.
    pub speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z, 45.0, 3.0, 100.0)
    }
}

/// Snapshot of the camera basis, printed by [`Action::ReportPose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl fmt::Display for CameraPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |v: Vec3| format!("{:.3}, {:.3}, {:.3}", v.x, v.y, v.z);
        write!(
            f,
            "position: {} | front: {} | up: {} | right: {}",
            v(self.position),
            v(self.front),
            v(self.up),
            v(self.right)
        )
    }
}

impl FlyCamera {
    /// Camera at `position` looking along `front`, with world `+Y` as the
    /// initial up hint. A `front` parallel to `+Y` falls back to `-Z`.
    pub fn new(position: Vec3, front: Vec3, fov: f32, speed: f32, turn_speed: f32) -> Self {
        let mut camera = Self {
            position,
            front: front.normalize_or_fallback(Vec3::NEG_Z),
            up: Vec3::Y,
            right: Vec3::X,
            fov,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            speed,
            turn_speed,
        };
        if camera.front.cross(Vec3::Y).try_normalize().is_none() {
            camera.front = Vec3::NEG_Z;
        }
        camera.orthonormalize();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            front: self.front,
            up: self.up,
            right: self.right,
        }
    }

    /// Rotate the whole basis by `rotation`.
    pub fn rotate(&mut self, rotation: Quat) {
        self.front = rotate_vec3(rotation, self.front);
        self.right = rotate_vec3(rotation, self.right);
        self.up = rotate_vec3(rotation, self.up);
        self.orthonormalize();
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Apply one action over a frame of `dt` seconds.
    pub fn apply(&mut self, action: Action, dt: f32) {
        match action {
            Action::Move(axis, direction) => {
                let along = match axis {
                    Axis::Front => self.front,
                    Axis::Right => self.right,
                    Axis::Up => self.up,
                };
                self.translate(along * self.speed * direction.sign() * dt);
            }
            Action::Pitch(direction) => {
                let angle = self.turn_speed * direction.sign() * dt;
                self.rotate(axis_angle(self.right, angle));
            }
            Action::Yaw(direction) => {
                let angle = self.turn_speed * direction.sign() * dt;
                self.rotate(axis_angle(Vec3::Y, angle));
            }
            Action::ReportPose => {
                tracing::info!("camera {}", self.pose());
            }
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        perspective(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The view as seen by renderer-agnostic consumers.
    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.position,
            target: self.position + self.front,
            fov_degrees: self.fov,
        }
    }

    /// Gram-Schmidt on `front` then `up`; `right = front × up`.
    fn orthonormalize(&mut self) {
        self.front = self.front.normalize_or_fallback(Vec3::NEG_Z);
        let up = self.up - self.front * self.front.dot(self.up);
        self.up = up.normalize_or_fallback(self.right.cross(self.front).normalize_or_fallback(Vec3::Y));
        self.right = self.front.cross(self.up);
    }
}
