use vista_common::MeshData;
use vista_math::Vec3;

use crate::heightfield::Heightfield;

/// Normal assigned to a vertex whose accumulated face normals cancel to zero.
pub const FALLBACK_NORMAL: Vec3 = Vec3::Y;

/// Turn a heightfield into a triangle mesh with smooth per-vertex normals.
///
/// Sample `(x, z)` becomes vertex `x * depth + z` at `(x, height, z)`. Every
/// quad emits `(top_left, bottom_left, top_right)` and
/// `(bottom_left, bottom_right, top_right)`, clockwise seen from above.
/// Face normals are summed unnormalized into their vertices, so larger faces
/// weigh more, and each sum is normalized at the end.
pub fn derive_mesh(field: &Heightfield) -> MeshData {
    let (width, depth) = (field.width(), field.depth());
    let _span = tracing::debug_span!("derive_mesh", width, depth).entered();

    let vertex_count = width * depth;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    for x in 0..width {
        for z in 0..depth {
            positions.extend_from_slice(&[x as f32, field.get(x, z), z as f32]);
        }
    }

    let quads = width.saturating_sub(1) * depth.saturating_sub(1);
    let mut indices = Vec::with_capacity(quads * 6);
    let mut accum = vec![Vec3::ZERO; vertex_count];
    let position = |i: usize| Vec3::from_slice(&positions[i * 3..i * 3 + 3]);

    for x in 0..width.saturating_sub(1) {
        for z in 0..depth.saturating_sub(1) {
            let top_left = field.index(x, z);
            let bottom_left = field.index(x + 1, z);
            let top_right = field.index(x, z + 1);
            let bottom_right = field.index(x + 1, z + 1);

            for [a, b, c] in [
                [top_left, bottom_left, top_right],
                [bottom_left, bottom_right, top_right],
            ] {
                indices.extend_from_slice(&[a as u32, b as u32, c as u32]);
                let normal = face_normal(position(a), position(b), position(c));
                accum[a] += normal;
                accum[b] += normal;
                accum[c] += normal;
            }
        }
    }

    let mut fallbacks = 0usize;
    let mut normals = Vec::with_capacity(vertex_count * 3);
    for sum in accum {
        let normal = sum.try_normalize().unwrap_or_else(|| {
            fallbacks += 1;
            FALLBACK_NORMAL
        });
        normals.extend_from_slice(&normal.to_array());
    }
    if fallbacks > 0 && quads > 0 {
        tracing::warn!(fallbacks, "degenerate vertex normals replaced with up vector");
    }

    tracing::trace!(
        vertices = vertex_count,
        triangles = indices.len() / 3,
        "mesh derived"
    );

    MeshData {
        positions,
        normals,
        indices,
    }
}

/// Unnormalized normal of triangle `(a, b, c)`, pointing toward `+Y` for the
/// clockwise-from-above winding used by [`derive_mesh`]. Its length is twice
/// the triangle's area.
fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - a).cross(b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_common::ChunkCoord;

    fn field(width: usize, depth: usize, f: impl FnMut(usize, usize) -> f32) -> Heightfield {
        Heightfield::from_fn(ChunkCoord::default(), width, depth, f)
    }

    #[test]
    fn positions_follow_grid_and_height() {
        let mesh = derive_mesh(&field(3, 2, |x, z| (x + z) as f32 * 0.5));
        assert_eq!(mesh.vertex_count(), 6);
        // Vertex index is x * depth + z.
        assert_eq!(mesh.position(0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.position(3), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.position(4), Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn index_count_and_validity() {
        let (w, d) = (5, 7);
        let mesh = derive_mesh(&field(w, d, |x, z| ((x * 3 + z) % 4) as f32));
        assert_eq!(mesh.indices.len(), 6 * (w - 1) * (d - 1));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < w * d));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn first_quad_winding() {
        let mesh = derive_mesh(&field(2, 2, |_, _| 0.0));
        // top_left=0, top_right=1, bottom_left=2, bottom_right=3
        assert_eq!(mesh.indices, vec![0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn flat_field_normals_point_up() {
        let mesh = derive_mesh(&field(4, 4, |_, _| 0.3));
        for v in 0..mesh.vertex_count() {
            assert_eq!(mesh.normal(v), Vec3::Y);
        }
    }

    #[test]
    fn slope_normals_tilt_against_gradient() {
        // Height rises one unit per step in x.
        let mesh = derive_mesh(&field(4, 4, |x, _| x as f32));
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        for v in 0..mesh.vertex_count() {
            assert!((mesh.normal(v) - expected).length() < 1e-6);
        }
    }

    #[test]
    fn normals_are_unit_length_on_rough_terrain() {
        let mesh = derive_mesh(&field(9, 6, |x, z| ((x * 7 + z * 13) % 5) as f32 - 2.0));
        for v in 0..mesh.vertex_count() {
            let n = mesh.normal(v);
            assert!((n.length() - 1.0).abs() < 1e-5, "vertex {v}: {n}");
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn larger_faces_weigh_more() {
        // Vertex 1 (x=0, z=1) belongs to both triangles of the only quad; a
        // spike at vertex 0 tilts and enlarges just the first one.
        let mesh = derive_mesh(&field(2, 2, |x, z| if x == 0 && z == 0 { 4.0 } else { 0.0 }));
        let n = mesh.normal(1);
        let tilted = face_normal(
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let flat = Vec3::Y;
        let expected = (tilted + flat).normalize();
        assert!((n - expected).length() < 1e-6);
    }

    #[test]
    fn single_row_uses_fallback() {
        let mesh = derive_mesh(&field(1, 5, |_, z| z as f32));
        assert_eq!(mesh.vertex_count(), 5);
        assert!(mesh.indices.is_empty());
        for v in 0..mesh.vertex_count() {
            assert_eq!(mesh.normal(v), FALLBACK_NORMAL);
            assert!(!mesh.normal(v).is_nan());
        }
    }

    #[test]
    fn empty_field_yields_empty_mesh() {
        let mesh = derive_mesh(&field(0, 0, |_, _| 0.0));
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
