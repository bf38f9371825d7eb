//! STL reader
//!
//! Binary layout: 80-byte header, u32 LE triangle count, then 50 bytes per
//! triangle (normal, three vertices as f32 LE, u16 attribute count).
//! Stored normals are ignored; shading derives them from winding.

use super::{MeshError, TriangleMesh};
use crate::rasterizer::{Face, Vec3};

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: u64 = 50;

/// Parse STL bytes, binary or ASCII
pub fn parse(data: &[u8]) -> Result<TriangleMesh, MeshError> {
    if is_binary(data) {
        parse_binary(data)
    } else {
        let text = std::str::from_utf8(data).map_err(|_| MeshError::InvalidText)?;
        parse_ascii(text)
    }
}

/// Binary when the size matches the declared triangle count exactly, or
/// when the data does not open with the ASCII `solid` keyword.
fn is_binary(data: &[u8]) -> bool {
    if data.len() >= HEADER_LEN + 4 {
        let count = read_u32(data, HEADER_LEN) as u64;
        if (HEADER_LEN as u64 + 4) + count * TRIANGLE_LEN == data.len() as u64 {
            return true;
        }
    }

    // Some exporters pad the keyword with a few leading bytes
    !(0..5).any(|off| data.get(off..off + 5) == Some(b"solid"))
}

pub fn parse_binary(data: &[u8]) -> Result<TriangleMesh, MeshError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(MeshError::TooShort { len: data.len() });
    }

    let triangles = read_u32(data, HEADER_LEN);
    let expected = (HEADER_LEN as u64 + 4) + triangles as u64 * TRIANGLE_LEN;
    if (data.len() as u64) < expected {
        return Err(MeshError::Truncated {
            triangles,
            expected,
            actual: data.len(),
        });
    }

    let count = triangles as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut faces = Vec::with_capacity(count);

    let mut offset = HEADER_LEN + 4;
    for _ in 0..count {
        offset += 12; // stored normal
        let base = positions.len();
        for _ in 0..3 {
            positions.push(read_vec3(data, offset));
            offset += 12;
        }
        faces.push(Face::new(base, base + 1, base + 2));
        offset += 2; // attribute byte count
    }

    Ok(TriangleMesh::from_parts(positions, faces))
}

pub fn parse_ascii(text: &str) -> Result<TriangleMesh, MeshError> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();
    let mut loop_start: Option<usize> = None;

    for (line_num, line) in text.lines().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = parts.first() else {
            continue;
        };

        match *keyword {
            "outer" => loop_start = Some(positions.len()),
            "vertex" => {
                if parts.len() < 4 {
                    return Err(parse_error(line_num, "vertex needs 3 coordinates"));
                }
                let x = parse_float(parts[1], line_num)?;
                let y = parse_float(parts[2], line_num)?;
                let z = parse_float(parts[3], line_num)?;
                positions.push(Vec3::new(x, y, z));
            }
            "endloop" => {
                let start = loop_start
                    .take()
                    .ok_or_else(|| parse_error(line_num, "endloop without outer loop"))?;
                let n = positions.len() - start;
                if n < 3 {
                    return Err(parse_error(line_num, "facet has fewer than 3 vertices"));
                }
                // Fan triangulation for the rare non-triangle facet
                for i in 1..(n - 1) {
                    faces.push(Face::new(start, start + i, start + i + 1));
                }
            }
            _ => {
                // solid, facet normal, endfacet, endsolid
            }
        }
    }

    if loop_start.is_some() {
        return Err(parse_error(text.lines().count(), "unterminated outer loop"));
    }

    Ok(TriangleMesh::from_parts(positions, faces))
}

fn parse_error(line_num: usize, message: &str) -> MeshError {
    MeshError::Parse {
        line: line_num + 1,
        message: message.to_string(),
    }
}

fn parse_float(s: &str, line_num: usize) -> Result<f32, MeshError> {
    s.parse()
        .map_err(|_| parse_error(line_num, &format!("invalid float value '{}'", s)))
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn read_vec3(data: &[u8], offset: usize) -> Vec3 {
    Vec3::new(
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a binary STL from triangles
    pub(crate) fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            data.extend_from_slice(&[0u8; 12]);
            for v in tri {
                for c in v {
                    data.extend_from_slice(&c.to_le_bytes());
                }
            }
            data.extend_from_slice(&[0u8; 2]);
        }
        data
    }

    #[test]
    fn test_parse_binary_single_triangle() {
        let data = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]]]);
        let mesh = parse(&data).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions[2], Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(mesh.faces[0], Face::new(0, 1, 2));
    }

    #[test]
    fn test_binary_header_starting_with_solid() {
        // Many exporters write "solid" into the binary header
        let mut data = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        data[..5].copy_from_slice(b"solid");
        let mesh = parse(&data).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_truncated_binary() {
        let mut data = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        data.truncate(100);
        match parse(&data) {
            Err(MeshError::Truncated { triangles, expected, actual }) => {
                assert_eq!(triangles, 1);
                assert_eq!(expected, 134);
                assert_eq!(actual, 100);
            }
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn test_too_short() {
        assert_eq!(parse(&[0u8; 10]), Err(MeshError::TooShort { len: 10 }));
    }

    #[test]
    fn test_parse_ascii() {
        let text = r#"solid cube
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 1 0
      vertex 0 1 -2.5e0
    endloop
  endfacet
endsolid cube
"#;
        let mesh = parse(text.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.positions[5], Vec3::new(0.0, 1.0, -2.5));
    }

    #[test]
    fn test_ascii_bad_float_reports_line() {
        let text = "solid x\nfacet normal 0 0 1\nouter loop\nvertex 0 0 zero\n";
        match parse(text.as_bytes()) {
            Err(MeshError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_ascii_unterminated_loop() {
        let text = "solid x\nouter loop\nvertex 0 0 0\n";
        assert!(matches!(parse(text.as_bytes()), Err(MeshError::Parse { .. })));
    }
}
