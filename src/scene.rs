//! Scene graph for the viewer
//!
//! A flat list of lights and meshes. At most one mesh is present at a time:
//! inserting a mesh evicts every existing mesh and leaves lights in place.

use crate::mesh::{Normalization, TriangleMesh};
use crate::rasterizer::{mat4_rotation_y, Color, Light, Mat4};

/// A loaded model with its material and transform
#[derive(Debug, Clone)]
pub struct MeshObject {
    pub name: String,
    /// Normalized geometry (centered, scaled to the target size)
    pub geometry: TriangleMesh,
    pub color: Color,
    /// Rotation about +Y, radians
    pub yaw: f32,
    /// How the source geometry was recentered and scaled
    pub normalization: Normalization,
}

impl MeshObject {
    pub fn model_matrix(&self) -> Mat4 {
        mat4_rotation_y(self.yaw)
    }
}

#[derive(Debug, Clone)]
pub enum SceneObject {
    Light(Light),
    Mesh(MeshObject),
}

impl SceneObject {
    pub fn is_mesh(&self) -> bool {
        matches!(self, SceneObject::Mesh(_))
    }
}

pub struct Scene {
    pub background: Color,
    children: Vec<SceneObject>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            children: Vec::new(),
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.children.push(SceneObject::Light(light));
    }

    /// Remove all meshes, then insert `mesh`. Returns how many were removed.
    pub fn replace_mesh(&mut self, mesh: MeshObject) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !c.is_mesh());
        let removed = before - self.children.len();
        self.children.push(SceneObject::Mesh(mesh));
        removed
    }

    pub fn mesh(&self) -> Option<&MeshObject> {
        self.children.iter().find_map(|c| match c {
            SceneObject::Mesh(m) => Some(m),
            SceneObject::Light(_) => None,
        })
    }

    pub fn mesh_mut(&mut self) -> Option<&mut MeshObject> {
        self.children.iter_mut().find_map(|c| match c {
            SceneObject::Mesh(m) => Some(m),
            SceneObject::Light(_) => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.children.iter().filter_map(|c| match c {
            SceneObject::Light(l) => Some(l),
            SceneObject::Mesh(_) => None,
        })
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_mesh()).count()
    }

    /// Drop every object, lights included
    pub fn clear(&mut self) {
        self.children.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Face, Vec3};

    fn mesh_named(name: &str) -> MeshObject {
        MeshObject {
            name: name.to_string(),
            geometry: TriangleMesh::from_parts(
                vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
                vec![Face::new(0, 1, 2)],
            ),
            color: Color::from_hex(0x606060),
            yaw: 0.0,
            normalization: Normalization { center: Vec3::ZERO, scale: 1.0 },
        }
    }

    fn lit_scene() -> Scene {
        let mut scene = Scene::new(Color::from_hex(0xf0f0f0));
        scene.add_light(Light::ambient(Color::WHITE, 0.5));
        scene.add_light(Light::directional(Color::WHITE, 0.7, Vec3::new(0.0, 50.0, 100.0), Vec3::ZERO));
        scene
    }

    #[test]
    fn test_replace_keeps_lights_and_single_mesh() {
        let mut scene = lit_scene();
        assert_eq!(scene.child_count(), 2);

        assert_eq!(scene.replace_mesh(mesh_named("first")), 0);
        assert_eq!(scene.child_count(), 3);

        assert_eq!(scene.replace_mesh(mesh_named("second")), 1);
        assert_eq!(scene.child_count(), 3);
        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.lights().count(), 2);
        assert_eq!(scene.mesh().map(|m| m.name.as_str()), Some("second"));
    }

    #[test]
    fn test_mesh_mut_edits_in_place() {
        let mut scene = lit_scene();
        assert!(scene.mesh_mut().is_none());
        scene.replace_mesh(mesh_named("m"));
        if let Some(m) = scene.mesh_mut() {
            m.yaw = 1.0;
        }
        assert_eq!(scene.mesh().map(|m| m.yaw), Some(1.0));
    }

    #[test]
    fn test_clear() {
        let mut scene = lit_scene();
        scene.replace_mesh(mesh_named("m"));
        scene.clear();
        assert_eq!(scene.child_count(), 0);
    }
}
