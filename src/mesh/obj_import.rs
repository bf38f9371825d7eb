//! OBJ file import
//! Reads vertex positions (v) and faces (f). Texture coordinates (vt) and
//! normals (vn) are counted so face references can be validated, but their
//! values are not kept.

use super::{MeshError, TriangleMesh};
use crate::rasterizer::{Face, Vec3};

/// OBJ file importer
pub struct ObjImporter;

impl ObjImporter {
    /// Parse OBJ file contents
    pub fn parse(contents: &str) -> Result<TriangleMesh, MeshError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coord_count = 0usize;
        let mut normal_count = 0usize;
        let mut faces: Vec<Face> = Vec::new();

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();

            match parts[0] {
                "v" => {
                    if parts.len() < 4 {
                        return Err(Self::error(line_num, "Invalid vertex position (expected 3 values)"));
                    }
                    let x = Self::parse_float(parts[1], line_num)?;
                    let y = Self::parse_float(parts[2], line_num)?;
                    let z = Self::parse_float(parts[3], line_num)?;
                    positions.push(Vec3::new(x, y, z));
                }

                "vt" => tex_coord_count += 1,
                "vn" => normal_count += 1,

                "f" => {
                    if parts.len() < 4 {
                        return Err(Self::error(line_num, "Face must have at least 3 vertices"));
                    }

                    let mut face_verts = Vec::with_capacity(parts.len() - 1);
                    for spec in &parts[1..] {
                        face_verts.push(Self::parse_face_vertex(
                            spec,
                            line_num,
                            positions.len(),
                            tex_coord_count,
                            normal_count,
                        )?);
                    }

                    // Fan triangulation from first vertex, keeping OBJ's CCW winding
                    for i in 1..(face_verts.len() - 1) {
                        faces.push(Face::new(face_verts[0], face_verts[i], face_verts[i + 1]));
                    }
                }

                _ => {
                    // Ignore other OBJ commands (o, g, s, usemtl, mtllib, etc.)
                }
            }
        }

        if positions.is_empty() {
            return Err(MeshError::Parse {
                line: 0,
                message: "No vertices found in OBJ file".to_string(),
            });
        }

        Ok(TriangleMesh::from_parts(positions, faces))
    }

    /// Parse a face vertex string like "1/2/3" or "1//3" or "1", returning
    /// the zero-based position index
    fn parse_face_vertex(
        spec: &str,
        line_num: usize,
        position_count: usize,
        tex_coord_count: usize,
        normal_count: usize,
    ) -> Result<usize, MeshError> {
        let mut parts = spec.split('/');

        let pos_idx = match parts.next() {
            Some(p) if !p.is_empty() => Self::parse_index(p, position_count, line_num)?,
            _ => return Err(Self::error(line_num, "Missing position index in face")),
        };

        if let Some(tc) = parts.next().filter(|s| !s.is_empty()) {
            Self::parse_index(tc, tex_coord_count, line_num)?;
        }
        if let Some(n) = parts.next().filter(|s| !s.is_empty()) {
            Self::parse_index(n, normal_count, line_num)?;
        }

        Ok(pos_idx)
    }

    /// Parse a float value
    fn parse_float(s: &str, line_num: usize) -> Result<f32, MeshError> {
        s.parse()
            .map_err(|_| Self::error(line_num, &format!("Invalid float value '{}'", s)))
    }

    /// Parse an index (handles negative indices for relative indexing)
    fn parse_index(s: &str, count: usize, line_num: usize) -> Result<usize, MeshError> {
        let idx: i64 = s
            .parse()
            .map_err(|_| Self::error(line_num, &format!("Invalid index '{}'", s)))?;

        let result = if idx > 0 {
            // Positive index (1-based)
            idx - 1
        } else if idx < 0 {
            // Negative index (relative to current count)
            count as i64 + idx
        } else {
            return Err(Self::error(line_num, "Index cannot be 0"));
        };

        if result < 0 || result as usize >= count {
            return Err(Self::error(
                line_num,
                &format!("Index {} out of range (have {} elements)", idx, count),
            ));
        }

        Ok(result as usize)
    }

    fn error(line_num: usize, message: &str) -> MeshError {
        MeshError::Parse {
            line: line_num + 1,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_triangle() {
        let obj = r#"
# Simple triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
f 1//1 2//1 3//1
"#;

        let mesh = ObjImporter::parse(obj).unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_parse_quad_triangulation() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
"#;

        let mesh = ObjImporter::parse(obj).unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2), Face::new(0, 2, 3)]);
    }

    #[test]
    fn test_negative_indices() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = ObjImporter::parse(obj).unwrap();
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_texture_index_out_of_range() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/2 3/3\n";
        match ObjImporter::parse(obj) {
            Err(MeshError::Parse { line, message }) => {
                assert_eq!(line, 5);
                assert!(message.contains("out of range"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_index_rejected() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(ObjImporter::parse(obj).is_err());
    }

    #[test]
    fn test_no_vertices() {
        assert!(ObjImporter::parse("# empty\no thing\n").is_err());
    }
}
