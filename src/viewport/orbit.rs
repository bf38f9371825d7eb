//! Mouse orbit controls
//!
//! Left-drag orbits the camera around `target`, right-drag (or Shift+left)
//! pans camera and target together, the wheel changes distance to the target.
//! Spherical coordinates are re-derived from the camera at every step, so
//! button-driven zoom/pan in between drags is picked up.

use crate::config::ControlsConfig;
use crate::rasterizer::{Camera, Vec3};

/// Elevation limit, just short of straight up/down
const MAX_ELEVATION: f32 = 1.4;

/// One frame of pointer state, in window pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub shift: bool,
    /// Positive = wheel up (zoom in)
    pub wheel: f32,
    /// Pointer is over a UI element; new drags and wheel input are ignored
    pub over_ui: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    drag: Option<DragMode>,
    last_pos: (f32, f32),
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            min_distance: 1.0,
            max_distance: 5000.0,
            drag: None,
            last_pos: (0.0, 0.0),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feed one frame of input. Returns true if the camera moved.
    pub fn handle(&mut self, input: &PointerInput, camera: &mut Camera, config: &ControlsConfig) -> bool {
        let mut moved = false;

        if !input.left_down && !input.right_down {
            self.drag = None;
        } else if let Some(mode) = self.drag {
            let dx = input.x - self.last_pos.0;
            let dy = input.y - self.last_pos.1;
            if dx != 0.0 || dy != 0.0 {
                moved = match mode {
                    DragMode::Rotate => self.rotate(camera, dx, dy, config.orbit_rotate_speed),
                    DragMode::Pan => self.pan(camera, dx, dy, config.orbit_pan_speed),
                };
            }
        } else if !input.over_ui {
            self.drag = Some(if input.right_down || input.shift {
                DragMode::Pan
            } else {
                DragMode::Rotate
            });
        }
        self.last_pos = (input.x, input.y);

        if input.wheel != 0.0 && !input.over_ui {
            let factor = if input.wheel > 0.0 {
                config.orbit_zoom_factor
            } else {
                1.0 / config.orbit_zoom_factor
            };
            moved |= self.dolly(camera, factor);
        }

        moved
    }

    fn rotate(&self, camera: &mut Camera, dx: f32, dy: f32, speed: f32) -> bool {
        let offset = camera.position - self.target;
        let distance = offset.len();
        if distance <= f32::EPSILON {
            return false;
        }

        let mut azimuth = offset.x.atan2(offset.z);
        let mut elevation = (offset.y / distance).clamp(-1.0, 1.0).asin();
        azimuth -= dx * speed;
        elevation = (elevation + dy * speed).clamp(-MAX_ELEVATION, MAX_ELEVATION);

        let dir = Vec3::new(
            elevation.cos() * azimuth.sin(),
            elevation.sin(),
            elevation.cos() * azimuth.cos(),
        );
        camera.position = self.target + dir * distance;
        camera.look_at(self.target);
        true
    }

    fn pan(&mut self, camera: &mut Camera, dx: f32, dy: f32, speed: f32) -> bool {
        let distance = (camera.position - self.target).len().max(self.min_distance);
        let pan_speed = distance * speed;
        let delta = camera.basis_y * dy * pan_speed - camera.basis_x * dx * pan_speed;
        self.target = self.target + delta;
        camera.position = camera.position + delta;
        true
    }

    fn dolly(&self, camera: &mut Camera, factor: f32) -> bool {
        let offset = camera.position - self.target;
        let distance = offset.len();
        if distance <= f32::EPSILON {
            return false;
        }
        let new_distance = (distance * factor).clamp(self.min_distance, self.max_distance);
        camera.position = self.target + offset * (new_distance / distance);
        camera.look_at(self.target);
        true
    }
}
