//! Perspective camera
//!
//! Right-handed, +Y up, looking down its local -Z axis.

use super::math::{mat4_perspective, perspective_transform, Mat4, Vec3};

/// Camera state for 3D rendering
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // Computed basis vectors: right, up, and back (view direction is -basis_z)
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,

    projection: Mat4,
}

impl Camera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            fov,
            aspect,
            near,
            far,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
            projection: [[0.0; 4]; 4],
        };
        cam.update_projection_matrix();
        cam
    }

    /// Rotate the camera so it faces `target`. Orientation is left alone
    /// when the target coincides with the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let back = (self.position - target).normalize();
        if back == Vec3::ZERO {
            return;
        }

        let mut right = Vec3::UP.cross(back).normalize();
        if right == Vec3::ZERO {
            // Looking straight up or down; any horizontal axis will do
            right = Vec3::new(1.0, 0.0, 0.0);
        }

        self.basis_z = back;
        self.basis_x = right;
        self.basis_y = back.cross(right);
    }

    /// Direction the camera is looking
    pub fn forward(&self) -> Vec3 {
        -self.basis_z
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.update_projection_matrix();
        }
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = mat4_perspective(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// World space to view space (camera at origin, looking down -Z)
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        perspective_transform(world - self.position, self.basis_x, self.basis_y, self.basis_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_origin_from_front() {
        let mut cam = Camera::new(50.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 200.0);
        cam.look_at(Vec3::ZERO);

        let f = cam.forward();
        assert!((f.z + 1.0).abs() < 0.001);
        assert!((cam.basis_x.x - 1.0).abs() < 0.001);
        assert!((cam.basis_y.y - 1.0).abs() < 0.001);

        let v = cam.to_view(Vec3::ZERO);
        assert!((v.z + 200.0).abs() < 0.001);
    }

    #[test]
    fn test_set_aspect_recomputes_projection() {
        let mut cam = Camera::new(50.0, 1.0, 0.1, 1000.0);
        let before = cam.projection()[0][0];
        cam.set_aspect(2.0);
        assert!((cam.aspect - 2.0).abs() < f32::EPSILON);
        assert!((cam.projection()[0][0] - before / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate() {
        let mut cam = Camera::new(50.0, 1.5, 0.1, 1000.0);
        cam.set_aspect(f32::INFINITY);
        cam.set_aspect(0.0);
        assert!((cam.aspect - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_look_at_straight_down_keeps_valid_basis() {
        let mut cam = Camera::new(50.0, 1.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 100.0, 0.0);
        cam.look_at(Vec3::ZERO);
        assert!((cam.basis_x.len() - 1.0).abs() < 0.001);
        assert!((cam.basis_y.len() - 1.0).abs() < 0.001);
    }
}
