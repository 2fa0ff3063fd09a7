use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from mesh buffer validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("position buffer length {0} is not a multiple of 3")]
    RaggedPositions(usize),
    #[error("normal count {normals} does not match vertex count {vertices}")]
    NormalCountMismatch { vertices: usize, normals: usize },
    #[error("index buffer length {0} is not a multiple of 3")]
    RaggedIndices(usize),
    #[error("index {index} at slot {slot} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertices: usize,
    },
}

/// Renderable triangle mesh in flat buffers.
///
/// Produced by the terrain mesh deriver and the OBJ loader, consumed by the
/// render adapters. Lifetime is whatever the caller decides; nothing in the
/// workspace caches meshes between frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// 3 floats per vertex.
    pub positions: Vec<f32>,
    /// 3 floats per vertex, unit length.
    pub normals: Vec<f32>,
    /// 3 indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[vertex * 3..vertex * 3 + 3])
    }

    pub fn normal(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[vertex * 3..vertex * 3 + 3])
    }

    /// Append a vertex with its normal. Returns the new vertex index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        index
    }

    /// Axis-aligned bounds of all positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.chunks_exact(3).map(Vec3::from_slice);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Check buffer shapes and that every index names an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::RaggedPositions(self.positions.len()));
        }
        let vertices = self.vertex_count();
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch {
                vertices,
                normals: self.normals.len() / 3,
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.indices.len()));
        }
        for (slot, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertices {
                return Err(MeshError::IndexOutOfRange {
                    slot,
                    index,
                    vertices,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        let mut mesh = MeshData::new();
        mesh.push_vertex(Vec3::ZERO, Vec3::Y);
        mesh.push_vertex(Vec3::X, Vec3::Y);
        mesh.push_vertex(Vec3::Z, Vec3::Y);
        mesh.indices.extend_from_slice(&[0, 2, 1]);
        mesh
    }

    #[test]
    fn counts_and_accessors() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.position(1), Vec3::X);
        assert_eq!(mesh.normal(2), Vec3::Y);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn bounds_cover_all_positions() {
        let (lo, hi) = triangle().bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(1.0, 0.0, 1.0));
        assert!(MeshData::new().bounds().is_none());
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.indices[1] = 3;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange {
                slot: 1,
                index: 3,
                vertices: 3
            })
        );
    }

    #[test]
    fn validate_rejects_ragged_buffers() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert_eq!(mesh.validate(), Err(MeshError::RaggedIndices(4)));

        let mut mesh = triangle();
        mesh.normals.truncate(6);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::NormalCountMismatch { .. })
        ));
    }
}
