//! Software rasterizer for the model viewport
//!
//! Features:
//! - Perspective camera with a real projection matrix (fov / aspect / near / far)
//! - Flat shading from ambient + directional lights
//! - Z-buffer with perspective-correct depth
//! - Screen-space backface culling
//!
//! # Module Organization
//!
//! - `types` - Color, Light, Face, RasterSettings
//! - `math` - Vec3, 4x4 matrices, projection
//! - `camera` - Perspective camera
//! - `render` - Framebuffer and mesh rendering

pub mod camera;
pub mod math;
pub mod render;
pub mod types;

pub use types::{Color, Face, Light, LightType, RasterSettings, RasterStats};

pub use math::{Vec3, Mat4, mat4_rotation_y};

pub use camera::Camera;

pub use render::{Framebuffer, render_mesh};
