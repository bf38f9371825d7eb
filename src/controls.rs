//! Discrete transform buttons: rotate the model, zoom and pan the camera
//!
//! Every operation takes an optional target and does nothing when it is
//! absent, so buttons are safe to press before a model or viewport exists.

use crate::config::ControlsConfig;
use crate::rasterizer::Camera;
use crate::scene::MeshObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Yaw the model by one step. Returns whether anything changed.
pub fn rotate(mesh: Option<&mut MeshObject>, direction: RotateDirection, step: f32) -> bool {
    let Some(mesh) = mesh else {
        return false;
    };
    match direction {
        RotateDirection::Left => mesh.yaw -= step,
        RotateDirection::Right => mesh.yaw += step,
    }
    true
}

/// Dolly the camera along world Z
pub fn zoom(camera: Option<&mut Camera>, direction: ZoomDirection, step: f32) -> bool {
    let Some(camera) = camera else {
        return false;
    };
    match direction {
        ZoomDirection::In => camera.position.z -= step,
        ZoomDirection::Out => camera.position.z += step,
    }
    true
}

/// Slide the camera along world X/Y
pub fn pan(camera: Option<&mut Camera>, direction: PanDirection, step: f32) -> bool {
    let Some(camera) = camera else {
        return false;
    };
    match direction {
        PanDirection::Left => camera.position.x -= step,
        PanDirection::Right => camera.position.x += step,
        PanDirection::Up => camera.position.y += step,
        PanDirection::Down => camera.position.y -= step,
    }
    true
}

/// One of the eight transform buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformAction {
    Rotate(RotateDirection),
    Zoom(ZoomDirection),
    Pan(PanDirection),
}

impl TransformAction {
    /// Button order in the panel
    pub const ALL: [TransformAction; 8] = [
        TransformAction::Rotate(RotateDirection::Left),
        TransformAction::Rotate(RotateDirection::Right),
        TransformAction::Zoom(ZoomDirection::In),
        TransformAction::Zoom(ZoomDirection::Out),
        TransformAction::Pan(PanDirection::Left),
        TransformAction::Pan(PanDirection::Right),
        TransformAction::Pan(PanDirection::Up),
        TransformAction::Pan(PanDirection::Down),
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransformAction::Rotate(RotateDirection::Left) => "Rotate Left",
            TransformAction::Rotate(RotateDirection::Right) => "Rotate Right",
            TransformAction::Zoom(ZoomDirection::In) => "Zoom In",
            TransformAction::Zoom(ZoomDirection::Out) => "Zoom Out",
            TransformAction::Pan(PanDirection::Left) => "Pan Left",
            TransformAction::Pan(PanDirection::Right) => "Pan Right",
            TransformAction::Pan(PanDirection::Up) => "Pan Up",
            TransformAction::Pan(PanDirection::Down) => "Pan Down",
        }
    }

    /// Apply to whichever of mesh/camera the action targets
    pub fn apply(
        self,
        mesh: Option<&mut MeshObject>,
        camera: Option<&mut Camera>,
        config: &ControlsConfig,
    ) -> bool {
        match self {
            TransformAction::Rotate(dir) => rotate(mesh, dir, config.rotate_step),
            TransformAction::Zoom(dir) => zoom(camera, dir, config.zoom_step),
            TransformAction::Pan(dir) => pan(camera, dir, config.pan_step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Normalization, TriangleMesh};
    use crate::rasterizer::{Color, Vec3};
    use std::f32::consts::PI;

    fn mesh() -> MeshObject {
        MeshObject {
            name: "m.stl".to_string(),
            geometry: TriangleMesh::default(),
            color: Color::from_hex(0x606060),
            yaw: 0.0,
            normalization: Normalization { center: Vec3::ZERO, scale: 1.0 },
        }
    }

    fn camera() -> Camera {
        let mut cam = Camera::new(50.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 200.0);
        cam
    }

    #[test]
    fn test_rotate_left_twice() {
        let mut m = mesh();
        assert!(rotate(Some(&mut m), RotateDirection::Left, PI / 8.0));
        assert!(rotate(Some(&mut m), RotateDirection::Left, PI / 8.0));
        assert!((m.yaw + 2.0 * PI / 8.0).abs() < 1e-6);

        rotate(Some(&mut m), RotateDirection::Right, PI / 8.0);
        assert!((m.yaw + PI / 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_in_then_out_restores() {
        let mut cam = camera();
        zoom(Some(&mut cam), ZoomDirection::In, 10.0);
        assert_eq!(cam.position.z, 190.0);
        zoom(Some(&mut cam), ZoomDirection::Out, 10.0);
        assert_eq!(cam.position.z, 200.0);
    }

    #[test]
    fn test_pan_directions() {
        let mut cam = camera();
        pan(Some(&mut cam), PanDirection::Left, 10.0);
        pan(Some(&mut cam), PanDirection::Up, 10.0);
        assert_eq!(cam.position, Vec3::new(-10.0, 10.0, 200.0));
        pan(Some(&mut cam), PanDirection::Right, 10.0);
        pan(Some(&mut cam), PanDirection::Down, 10.0);
        pan(Some(&mut cam), PanDirection::Down, 10.0);
        assert_eq!(cam.position, Vec3::new(0.0, -10.0, 200.0));
    }

    #[test]
    fn test_missing_target_is_noop() {
        assert!(!rotate(None, RotateDirection::Left, 1.0));
        assert!(!zoom(None, ZoomDirection::In, 1.0));
        assert!(!pan(None, PanDirection::Up, 1.0));

        let config = ControlsConfig::default();
        for action in TransformAction::ALL {
            assert!(!action.apply(None, None, &config));
        }
    }

    #[test]
    fn test_camera_orientation_unchanged_by_pan() {
        let mut cam = camera();
        cam.look_at(Vec3::ZERO);
        let forward = cam.forward();
        pan(Some(&mut cam), PanDirection::Right, 10.0);
        assert_eq!(cam.forward(), forward);
    }

    #[test]
    fn test_labels_unique() {
        let mut labels: Vec<_> = TransformAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 8);
    }
}
