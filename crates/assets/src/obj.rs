//! Wavefront OBJ reader for triangulated models.
//!
//! Supported statements: `v`, `vt`, `vn` and triangular `f` faces whose
//! corners are `v`, `v/t`, `v//n` or `v/t/n` (1-based, negative indices count
//! back from the end). Everything else (`o`, `g`, `s`, `usemtl`, ...) is
//! skipped.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use vista_common::MeshData;
use vista_math::{NormalizeOr, Vec2, Vec3};

/// Errors from OBJ parsing.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected a number, got {token:?}")]
    BadNumber { line: usize, token: String },
    #[error("line {line}: `{statement}` needs {expected} components")]
    MissingComponent {
        line: usize,
        statement: &'static str,
        expected: usize,
    },
    #[error("line {line}: malformed face corner {token:?}")]
    BadCorner { line: usize, token: String },
    #[error("line {line}: {kind} index {index} out of range ({len} defined)")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        len: usize,
    },
    #[error("line {line}: face has {corners} corners, only triangles are supported")]
    NotTriangle { line: usize, corners: usize },
}

/// A loaded model: mesh buffers plus per-vertex texture coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    pub mesh: MeshData,
    /// 2 floats per vertex; `(0, 0)` where the file gave none.
    pub tex_coords: Vec<f32>,
}

/// Bit pattern of one face corner, with `-0.0` folded into `0.0` so bit
/// equality agrees with float equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u32; 8]);

impl VertexKey {
    fn new(position: Vec3, uv: Vec2, normal: Vec3) -> Self {
        let bits = |v: f32| if v == 0.0 { 0 } else { v.to_bits() };
        Self([
            bits(position.x),
            bits(position.y),
            bits(position.z),
            bits(uv.x),
            bits(uv.y),
            bits(normal.x),
            bits(normal.y),
            bits(normal.z),
        ])
    }
}

/// One `f` corner after index resolution.
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

#[derive(Default)]
struct Builder {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    seen: HashMap<VertexKey, u32>,
    model: ObjModel,
}

impl Builder {
    fn emit(&mut self, position: Vec3, uv: Vec2, normal: Vec3) {
        let key = VertexKey::new(position, uv, normal);
        let index = match self.seen.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.model.mesh.push_vertex(position, normal);
                self.model.tex_coords.extend_from_slice(&uv.to_array());
                self.seen.insert(key, index);
                index
            }
        };
        self.model.mesh.indices.push(index);
    }

    fn face(&mut self, corners: [Corner; 3]) {
        let p = corners.each_ref().map(|c| self.positions[c.position]);
        let flat = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_fallback(Vec3::Y);
        for (corner, position) in corners.iter().zip(p) {
            let uv = corner.uv.map_or(Vec2::ZERO, |i| self.uvs[i]);
            let normal = corner.normal.map_or(flat, |i| self.normals[i]);
            self.emit(position, uv, normal);
        }
    }
}

fn floats<const N: usize>(
    line: usize,
    statement: &'static str,
    tokens: &mut std::str::SplitWhitespace<'_>,
) -> Result<[f32; N], ObjError> {
    let mut out = [0.0; N];
    for slot in &mut out {
        let token = tokens.next().ok_or(ObjError::MissingComponent {
            line,
            statement,
            expected: N,
        })?;
        *slot = token.parse().map_err(|_| ObjError::BadNumber {
            line,
            token: token.to_string(),
        })?;
    }
    Ok(out)
}

/// Resolve a 1-based (or negative, relative) OBJ index against `len` entries.
fn resolve(
    line: usize,
    kind: &'static str,
    token: &str,
    len: usize,
) -> Result<usize, ObjError> {
    let raw: i64 = token.parse().map_err(|_| ObjError::BadNumber {
        line,
        token: token.to_string(),
    })?;
    let resolved = if raw > 0 {
        raw - 1
    } else {
        len as i64 + raw
    };
    if raw == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(ObjError::IndexOutOfRange {
            line,
            kind,
            index: raw,
            len,
        });
    }
    Ok(resolved as usize)
}

fn corner(line: usize, token: &str, builder: &Builder) -> Result<Corner, ObjError> {
    let bad = || ObjError::BadCorner {
        line,
        token: token.to_string(),
    };
    if token.matches('/').count() > 2 {
        return Err(bad());
    }
    let mut parts = token.split('/');
    let position = match parts.next() {
        Some(p) if !p.is_empty() => resolve(line, "position", p, builder.positions.len())?,
        _ => return Err(bad()),
    };
    let uv = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve(line, "texture", t, builder.uvs.len())?),
        _ => None,
    };
    let normal = match parts.next() {
        Some(n) if !n.is_empty() => Some(resolve(line, "normal", n, builder.normals.len())?),
        _ => None,
    };
    Ok(Corner {
        position,
        uv,
        normal,
    })
}

/// Parse OBJ text from any buffered reader.
///
/// Corners without a normal take the face's flat normal (`+Y` for a
/// degenerate face); corners without a texture coordinate get `(0, 0)`.
pub fn parse_obj(reader: impl BufRead) -> Result<ObjModel, ObjError> {
    let mut builder = Builder::default();

    for (number, text) in reader.lines().enumerate() {
        let text = text?;
        let line = number + 1;
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let [x, y, z] = floats::<3>(line, "v", &mut tokens)?;
                builder.positions.push(Vec3::new(x, y, z));
            }
            Some("vt") => {
                let [u, v] = floats::<2>(line, "vt", &mut tokens)?;
                builder.uvs.push(Vec2::new(u, v));
            }
            Some("vn") => {
                let [x, y, z] = floats::<3>(line, "vn", &mut tokens)?;
                builder.normals.push(Vec3::new(x, y, z));
            }
            Some("f") => {
                let corners = tokens
                    .map(|t| corner(line, t, &builder))
                    .collect::<Result<Vec<_>, _>>()?;
                let count = corners.len();
                let corners: [Corner; 3] = corners
                    .try_into()
                    .map_err(|_| ObjError::NotTriangle {
                        line,
                        corners: count,
                    })?;
                builder.face(corners);
            }
            Some(other) if !other.starts_with('#') => {
                tracing::trace!(line, statement = other, "skipping OBJ statement");
            }
            _ => {}
        }
    }

    let model = builder.model;
    tracing::debug!(
        vertices = model.mesh.vertex_count(),
        triangles = model.mesh.triangle_count(),
        "OBJ parsed"
    );
    Ok(model)
}

/// Load an OBJ file from disk.
pub fn load_obj(path: impl AsRef<Path>) -> Result<ObjModel, ObjError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let model = parse_obj(std::io::BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        vertices = model.mesh.vertex_count(),
        "loaded OBJ model"
    );
    Ok(model)
}
