//! Core types for the rasterizer

use super::math::Vec3;
use serde::{Deserialize, Serialize};

/// RGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a packed 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Apply per-channel shading (each factor 0.0-1.0)
    pub fn shade_rgb(self, r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (self.r as f32 * r.clamp(0.0, 1.0)) as u8,
            g: (self.g as f32 * g.clamp(0.0, 1.0)) as u8,
            b: (self.b as f32 * b.clamp(0.0, 1.0)) as u8,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Triangle referencing three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Face {
    pub const fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightType {
    /// Uniform light from every direction
    Ambient,
    /// Parallel rays travelling along `direction` (normalized)
    Directional { direction: Vec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub light_type: LightType,
    pub color: Color,
    pub intensity: f32,
    pub enabled: bool,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            light_type: LightType::Ambient,
            color,
            intensity,
            enabled: true,
        }
    }

    /// Directional light placed at `position`, shining toward `target`
    pub fn directional(color: Color, intensity: f32, position: Vec3, target: Vec3) -> Self {
        Self {
            light_type: LightType::Directional {
                direction: (target - position).normalize(),
            },
            color,
            intensity,
            enabled: true,
        }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Depth test against the z-buffer
    pub use_zbuffer: bool,
    /// Skip triangles facing away from the camera
    pub backface_cull: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            use_zbuffer: true,
            backface_cull: true,
        }
    }
}

/// Per-call statistics from `render_mesh`
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterStats {
    pub triangles_in: usize,
    pub triangles_drawn: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x606060);
        assert_eq!(c, Color::new(0x60, 0x60, 0x60));
        assert_eq!(Color::from_hex(0xf0f0f0).to_bytes(), [0xf0, 0xf0, 0xf0, 255]);
    }

    #[test]
    fn test_shade_rgb_clamps() {
        let c = Color::new(200, 100, 50).shade_rgb(2.0, 0.5, -1.0);
        assert_eq!(c, Color::new(200, 50, 0));
    }

    #[test]
    fn test_directional_points_at_target() {
        let light = Light::directional(Color::WHITE, 0.7, Vec3::new(0.0, 50.0, 100.0), Vec3::ZERO);
        match light.light_type {
            LightType::Directional { direction } => {
                assert!((direction.len() - 1.0).abs() < 0.001);
                assert!(direction.y < 0.0 && direction.z < 0.0);
            }
            LightType::Ambient => panic!("expected directional light"),
        }
    }
}
