use vista_common::MeshData;
use vista_math::{Mat4, Vec3};

/// Light and color settings shared by every object in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub object_color: Vec3,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub clear_color: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            object_color: Vec3::new(0.0, 1.0, 0.0),
            light_position: Vec3::new(500.0, 70.0, 100.0),
            light_color: Vec3::ONE,
            clear_color: Vec3::new(0.38, 0.58, 0.98),
        }
    }
}

/// One mesh placed in the world.
#[derive(Debug, Clone, Copy)]
pub struct SceneObject<'a> {
    pub label: &'a str,
    pub mesh: &'a MeshData,
    pub model: Mat4,
}

/// Borrowed view of everything drawn in one frame.
#[derive(Debug, Clone, Default)]
pub struct Scene<'a> {
    pub objects: Vec<SceneObject<'a>>,
    pub lighting: Lighting,
}

impl<'a> Scene<'a> {
    pub fn new(lighting: Lighting) -> Self {
        Self {
            objects: Vec::new(),
            lighting,
        }
    }

    pub fn add(&mut self, label: &'a str, mesh: &'a MeshData, model: Mat4) -> &mut Self {
        self.objects.push(SceneObject { label, mesh, model });
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }

    /// World-space bounds over every object, or `None` if nothing has vertices.
    ///
    /// Each mesh's local box is carried through its model matrix corner by
    /// corner, so rotated objects stay enclosed.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.objects
            .iter()
            .filter_map(|o| {
                let (lo, hi) = o.mesh.bounds()?;
                (0..8)
                    .map(|i| {
                        let corner = Vec3::new(
                            if i & 1 == 0 { lo.x } else { hi.x },
                            if i & 2 == 0 { lo.y } else { hi.y },
                            if i & 4 == 0 { lo.z } else { hi.z },
                        );
                        let p = o.model.transform_point3(corner);
                        (p, p)
                    })
                    .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
            })
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}
