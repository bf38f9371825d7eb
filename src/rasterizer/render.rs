//! Core rendering functions
//! Triangle rasterization with flat shading and a depth buffer

use super::camera::Camera;
use super::math::{mat4_transform_homogeneous, mat4_transform_point, Mat4, Vec3};
use super::types::{Color, Face, Light, LightType, RasterSettings, RasterStats};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
            self.zbuffer = vec![f32::MAX; width * height];
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f32::MAX);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                return true;
            }
        }
        false
    }

    /// Read back a pixel as RGBA
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut out = [0; 4];
            out.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(out)
        } else {
            None
        }
    }
}

/// Screen-space triangle ready for rasterization
struct Surface {
    v1: Vec3, // screen x, y and positive view depth in z
    v2: Vec3,
    v3: Vec3,
    color: Color,
}

/// Calculate shading color from all lights
/// Returns RGB values 0.0-1.0 for each channel
fn shade_multi_light_color(normal: Vec3, lights: &[Light]) -> (f32, f32, f32) {
    let mut total_r = 0.0;
    let mut total_g = 0.0;
    let mut total_b = 0.0;

    for light in lights.iter().filter(|l| l.enabled) {
        let contribution = match light.light_type {
            LightType::Ambient => light.intensity,
            LightType::Directional { direction } => {
                let n_dot_l = normal.dot(-direction).max(0.0);
                n_dot_l * light.intensity
            }
        };

        total_r += contribution * light.color.r as f32 / 255.0;
        total_g += contribution * light.color.g as f32 / 255.0;
        total_b += contribution * light.color.b as f32 / 255.0;
    }

    (total_r.min(1.0), total_g.min(1.0), total_b.min(1.0))
}

/// Rasterize a single triangle using incremental edge functions.
/// Depth is interpolated as 1/z, which is linear in screen space.
fn rasterize_triangle(fb: &mut Framebuffer, surface: &Surface, settings: &RasterSettings) -> usize {
    let v1 = surface.v1;
    let v2 = surface.v2;
    let v3 = surface.v3;

    let min_x = v1.x.min(v2.x).min(v3.x).max(0.0) as usize;
    let max_x = (v1.x.max(v2.x).max(v3.x) + 1.0).min(fb.width as f32).max(0.0) as usize;
    let min_y = v1.y.min(v2.y).min(v3.y).max(0.0) as usize;
    let max_y = (v1.y.max(v2.y).max(v3.y) + 1.0).min(fb.height as f32).max(0.0) as usize;

    if min_x >= max_x || min_y >= max_y {
        return 0;
    }

    // Twice the signed area; either winding works since it normalizes the weights
    let area = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if area.abs() < 0.00001 {
        return 0;
    }
    let inv_area = 1.0 / area;

    // Edge coefficients for the weights of v1 and v2; v3 is the remainder
    let a0 = v2.y - v3.y;
    let b0 = v3.x - v2.x;
    let a1 = v3.y - v1.y;
    let b1 = v1.x - v3.x;

    // Sample at pixel centers
    let start_x = min_x as f32 + 0.5;
    let start_y = min_y as f32 + 0.5;
    let mut w0_row = a0 * (start_x - v3.x) + b0 * (start_y - v3.y);
    let mut w1_row = a1 * (start_x - v3.x) + b1 * (start_y - v3.y);

    let inv_z1 = 1.0 / v1.z;
    let inv_z2 = 1.0 / v2.z;
    let inv_z3 = 1.0 / v3.z;

    let mut written = 0;
    for y in min_y..max_y {
        let mut w0 = w0_row;
        let mut w1 = w1_row;

        for x in min_x..max_x {
            let bc_x = w0 * inv_area;
            let bc_y = w1 * inv_area;
            let bc_z = 1.0 - bc_x - bc_y;

            const ERR: f32 = -0.0001;
            if bc_x >= ERR && bc_y >= ERR && bc_z >= ERR {
                let z = 1.0 / (bc_x * inv_z1 + bc_y * inv_z2 + bc_z * inv_z3);
                let drawn = if settings.use_zbuffer {
                    fb.set_pixel_with_depth(x, y, z, surface.color)
                } else {
                    fb.set_pixel(x, y, surface.color);
                    true
                };
                if drawn {
                    written += 1;
                }
            }

            w0 += a0;
            w1 += a1;
        }

        w0_row += b0;
        w1_row += b1;
    }

    written
}

/// Render a triangle mesh with a model transform, flat shading and a single
/// material color.
pub fn render_mesh(
    fb: &mut Framebuffer,
    positions: &[Vec3],
    faces: &[Face],
    model: &Mat4,
    base_color: Color,
    camera: &Camera,
    lights: &[Light],
    settings: &RasterSettings,
) -> RasterStats {
    let mut stats = RasterStats {
        triangles_in: faces.len(),
        ..Default::default()
    };

    if fb.width == 0 || fb.height == 0 {
        return stats;
    }

    // === TRANSFORM PHASE ===
    let world: Vec<Vec3> = positions.iter().map(|p| mat4_transform_point(model, *p)).collect();
    let view: Vec<Vec3> = world.iter().map(|p| camera.to_view(*p)).collect();

    let w = fb.width as f32;
    let h = fb.height as f32;
    let projected: Vec<Vec3> = view
        .iter()
        .map(|v| {
            let clip = mat4_transform_homogeneous(camera.projection(), *v);
            let inv_w = if clip[3].abs() > f32::EPSILON { 1.0 / clip[3] } else { 0.0 };
            let ndc_x = clip[0] * inv_w;
            let ndc_y = clip[1] * inv_w;
            // Positive view depth is kept for depth interpolation
            Vec3::new((ndc_x + 1.0) * 0.5 * w, (1.0 - ndc_y) * 0.5 * h, -v.z)
        })
        .collect();

    // === CULL + RASTER PHASE ===
    for face in faces {
        let (Some(&d1), Some(&d2), Some(&d3)) = (
            projected.get(face.v0),
            projected.get(face.v1),
            projected.get(face.v2),
        ) else {
            continue;
        };

        // Skip triangles with any vertex in front of the near plane or all beyond far
        if d1.z <= camera.near || d2.z <= camera.near || d3.z <= camera.near {
            continue;
        }
        if d1.z > camera.far && d2.z > camera.far && d3.z > camera.far {
            continue;
        }

        // Screen y points down, so counter-clockwise front faces have negative area
        let signed_area = (d2.x - d1.x) * (d3.y - d1.y) - (d3.x - d1.x) * (d2.y - d1.y);
        let is_backface = signed_area >= 0.0;
        if is_backface && settings.backface_cull {
            continue;
        }

        let w1 = world[face.v0];
        let w2 = world[face.v1];
        let w3 = world[face.v2];
        let mut normal = (w2 - w1).cross(w3 - w1).normalize();
        if is_backface {
            normal = -normal;
        }

        let (r, g, b) = shade_multi_light_color(normal, lights);
        let surface = Surface {
            v1: d1,
            v2: d2,
            v3: d3,
            color: base_color.shade_rgb(r, g, b),
        };

        if rasterize_triangle(fb, &surface, settings) > 0 {
            stats.triangles_drawn += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::mat4_identity;

    fn front_camera(aspect: f32) -> Camera {
        let mut cam = Camera::new(50.0, aspect, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 200.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    fn quad() -> (Vec<Vec3>, Vec<Face>) {
        let positions = vec![
            Vec3::new(-50.0, -50.0, 0.0),
            Vec3::new(50.0, -50.0, 0.0),
            Vec3::new(50.0, 50.0, 0.0),
            Vec3::new(-50.0, 50.0, 0.0),
        ];
        // Counter-clockwise seen from +Z
        let faces = vec![Face::new(0, 1, 2), Face::new(0, 2, 3)];
        (positions, faces)
    }

    #[test]
    fn test_clear_fills_color_and_resets_depth() {
        let mut fb = Framebuffer::new(4, 3);
        fb.zbuffer[0] = 1.0;
        fb.clear(Color::from_hex(0xf0f0f0));
        assert_eq!(fb.pixel(3, 2), Some([0xf0, 0xf0, 0xf0, 255]));
        assert!(fb.zbuffer.iter().all(|z| *z == f32::MAX));
    }

    #[test]
    fn test_depth_test_keeps_nearest() {
        let mut fb = Framebuffer::new(2, 2);
        assert!(fb.set_pixel_with_depth(0, 0, 5.0, Color::WHITE));
        assert!(!fb.set_pixel_with_depth(0, 0, 6.0, Color::BLACK));
        assert_eq!(fb.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_render_front_facing_quad_covers_center() {
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);
        let (positions, faces) = quad();
        let lights = vec![Light::ambient(Color::WHITE, 1.0)];

        let stats = render_mesh(
            &mut fb,
            &positions,
            &faces,
            &mat4_identity(),
            Color::from_hex(0x606060),
            &front_camera(1.0),
            &lights,
            &RasterSettings::default(),
        );

        assert_eq!(stats.triangles_drawn, 2);
        assert_eq!(fb.pixel(32, 32), Some([0x60, 0x60, 0x60, 255]));
        // Corners stay background
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_backface_is_culled() {
        let mut fb = Framebuffer::new(32, 32);
        let (positions, _) = quad();
        let reversed = vec![Face::new(0, 2, 1), Face::new(0, 3, 2)];

        let stats = render_mesh(
            &mut fb,
            &positions,
            &reversed,
            &mat4_identity(),
            Color::WHITE,
            &front_camera(1.0),
            &[],
            &RasterSettings::default(),
        );
        assert_eq!(stats.triangles_drawn, 0);
    }

    #[test]
    fn test_geometry_behind_camera_is_skipped() {
        let mut fb = Framebuffer::new(32, 32);
        let positions = vec![
            Vec3::new(-10.0, -10.0, 300.0),
            Vec3::new(10.0, -10.0, 300.0),
            Vec3::new(0.0, 10.0, 300.0),
        ];
        let stats = render_mesh(
            &mut fb,
            &positions,
            &[Face::new(0, 1, 2)],
            &mat4_identity(),
            Color::WHITE,
            &front_camera(1.0),
            &[],
            &RasterSettings { backface_cull: false, ..Default::default() },
        );
        assert_eq!(stats.triangles_drawn, 0);
    }

    #[test]
    fn test_directional_light_brightens_facing_surface() {
        let (normal_r, _, _) = shade_multi_light_color(
            Vec3::new(0.0, 0.0, 1.0),
            &[
                Light::ambient(Color::WHITE, 0.5),
                Light::directional(Color::WHITE, 0.7, Vec3::new(0.0, 50.0, 100.0), Vec3::ZERO),
            ],
        );
        assert!(normal_r > 0.5);
        assert!(normal_r <= 1.0);
    }
}
