//! Triangle meshes loaded from model files
//!
//! - `stl` - binary and ASCII STL reader
//! - `obj_import` - Wavefront OBJ reader (positions and faces)
//! - `bounds` - axis-aligned bounds and size normalization

pub mod bounds;
pub mod obj_import;
pub mod stl;

pub use bounds::{normalize_to_size, Aabb, Normalization};
pub use obj_import::ObjImporter;

use crate::rasterizer::{Face, Vec3};
use std::collections::HashMap;
use thiserror::Error;

/// Indexed triangle soup. Normals are derived from winding at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl TriangleMesh {
    pub fn from_parts(positions: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { positions, faces }
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Drop positions no face references, remapping face indices in first-use order
    pub fn compact(&mut self) {
        let mut remap: HashMap<usize, usize> = HashMap::new();
        let mut positions = Vec::with_capacity(self.positions.len());
        for face in &mut self.faces {
            for idx in [&mut face.v0, &mut face.v1, &mut face.v2] {
                let old = *idx;
                *idx = *remap.entry(old).or_insert_with(|| {
                    positions.push(self.positions[old]);
                    positions.len() - 1
                });
            }
        }
        self.positions = positions;
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeshError {
    #[error("STL data is {len} bytes, smaller than the 84 byte header")]
    TooShort { len: usize },
    #[error("STL data truncated: {triangles} triangles need {expected} bytes, got {actual}")]
    Truncated {
        triangles: u32,
        expected: u64,
        actual: usize,
    },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("model text is not valid UTF-8")]
    InvalidText,
    #[error("model contains no triangles")]
    Empty,
}

/// File formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Pick a format from a file name; anything that is not `.obj` is read as STL.
    pub fn from_filename(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".obj") {
            MeshFormat::Obj
        } else {
            MeshFormat::Stl
        }
    }
}

/// Parse raw file bytes in the given format
pub fn parse_mesh(format: MeshFormat, data: &[u8]) -> Result<TriangleMesh, MeshError> {
    let mut mesh = match format {
        MeshFormat::Stl => stl::parse(data)?,
        MeshFormat::Obj => {
            let text = std::str::from_utf8(data).map_err(|_| MeshError::InvalidText)?;
            ObjImporter::parse(text)?
        }
    };

    if mesh.faces.is_empty() {
        return Err(MeshError::Empty);
    }
    mesh.compact();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(MeshFormat::from_filename("part.obj"), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_filename("PART.OBJ"), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_filename("part.stl"), MeshFormat::Stl);
        assert_eq!(MeshFormat::from_filename("part"), MeshFormat::Stl);
    }

    #[test]
    fn test_parse_mesh_rejects_empty_stl() {
        let mut data = vec![0u8; 84];
        data[80..84].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(parse_mesh(MeshFormat::Stl, &data), Err(MeshError::Empty));
    }

    #[test]
    fn test_compact_drops_unreferenced_positions() {
        let mut mesh = TriangleMesh::from_parts(
            vec![
                Vec3::new(9.0, 9.0, 9.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::new(1, 2, 3), Face::new(3, 2, 1)],
        );
        mesh.compact();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2), Face::new(2, 1, 0)]);
        assert_eq!(mesh.positions[0], Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_mesh_ignores_stray_obj_vertex() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1000 1000 1000\nf 1 2 3\n";
        let mesh = parse_mesh(MeshFormat::Obj, obj).unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.bounds().unwrap().max_dimension(), 1.0);
    }

    #[test]
    fn test_parse_mesh_rejects_non_utf8_obj() {
        assert_eq!(
            parse_mesh(MeshFormat::Obj, &[0xff, 0xfe, 0x00]),
            Err(MeshError::InvalidText)
        );
    }
}
