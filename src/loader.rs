//! Turns downloaded model bytes into a scene-ready mesh

use crate::config::ModelConfig;
use crate::mesh::{normalize_to_size, parse_mesh, MeshError, MeshFormat};
use crate::rasterizer::Color;
use crate::scene::MeshObject;

/// Parse `data` (format chosen from `filename`), then center it and scale it
/// to `config.target_size`.
pub fn load_model(filename: &str, data: &[u8], config: &ModelConfig) -> Result<MeshObject, MeshError> {
    let format = MeshFormat::from_filename(filename);
    let mut geometry = parse_mesh(format, data)?;
    let normalization =
        normalize_to_size(&mut geometry.positions, config.target_size).ok_or(MeshError::Empty)?;

    log::info!(
        "Loaded {} ({:?}): {} triangles, scale {:.4}",
        filename,
        format,
        geometry.triangle_count(),
        normalization.scale
    );

    Ok(MeshObject {
        name: filename.to_string(),
        geometry,
        color: Color::from_hex(config.material_color),
        yaw: 0.0,
        normalization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::stl::tests::binary_stl;
    use crate::rasterizer::Vec3;

    #[test]
    fn test_stl_is_centered_and_scaled() {
        // 2 x 4 x 0 triangle away from the origin
        let data = binary_stl(&[[[10.0, 10.0, 5.0], [12.0, 10.0, 5.0], [10.0, 14.0, 5.0]]]);
        let mesh = load_model("part.stl", &data, &ModelConfig::default()).unwrap();

        assert_eq!(mesh.name, "part.stl");
        assert_eq!(mesh.color, Color::from_hex(0x606060));
        assert_eq!(mesh.yaw, 0.0);
        assert!((mesh.normalization.scale - 25.0).abs() < 1e-4);

        let b = mesh.geometry.bounds().unwrap();
        assert!(b.center().len() < 1e-3);
        assert!((b.max_dimension() - 100.0).abs() < 1e-3);
        assert_eq!(b.min.z, 0.0);
    }

    #[test]
    fn test_obj_by_extension() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let config = ModelConfig {
            target_size: 10.0,
            ..ModelConfig::default()
        };
        let mesh = load_model("TRI.OBJ", obj, &config).unwrap();
        assert_eq!(mesh.geometry.triangle_count(), 1);
        assert_eq!(mesh.geometry.positions[1], Vec3::new(5.0, -5.0, 0.0));
    }

    #[test]
    fn test_unused_obj_vertex_does_not_skew_normalization() {
        let obj = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1000 1000 1000\nf 1 2 3\n";
        let mesh = load_model("stray.obj", obj, &ModelConfig::default()).unwrap();
        let b = mesh.geometry.bounds().unwrap();
        assert!((b.max_dimension() - 100.0).abs() < 1e-3);
        assert!((b.center() - Vec3::new(0.0, 0.0, 0.0)).len() < 1e-3);
    }

    #[test]
    fn test_stray_ascii_stl_vertex_is_ignored() {
        let stl = b"solid s\nvertex 500 500 500\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 2 0 0\nvertex 0 2 0\nendloop\nendfacet\nendsolid s\n";
        let mesh = load_model("s.stl", stl, &ModelConfig::default()).unwrap();
        assert_eq!(mesh.geometry.positions.len(), 3);
        let b = mesh.geometry.bounds().unwrap();
        assert!((b.max_dimension() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(load_model("junk.stl", b"not a model", &ModelConfig::default()).is_err());
    }
}
