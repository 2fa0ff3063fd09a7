use glam::{Vec2, Vec3, Vec4};

/// Convert degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Normalization that substitutes a caller-chosen value for zero-length input.
pub trait NormalizeOr: Sized {
    /// Unit vector in the same direction, or `fallback` when the length is
    /// zero or not finite.
    fn normalize_or_fallback(self, fallback: Self) -> Self;
}

impl NormalizeOr for Vec2 {
    fn normalize_or_fallback(self, fallback: Self) -> Self {
        self.try_normalize().unwrap_or(fallback)
    }
}

impl NormalizeOr for Vec3 {
    fn normalize_or_fallback(self, fallback: Self) -> Self {
        self.try_normalize().unwrap_or(fallback)
    }
}

impl NormalizeOr for Vec4 {
    fn normalize_or_fallback(self, fallback: Self) -> Self {
        self.try_normalize().unwrap_or(fallback)
    }
}
