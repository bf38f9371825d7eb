//! 3D viewport: scene, camera, orbit controls and the software framebuffer
//!
//! The framebuffer is rendered at `render_scale` of the window size and
//! stretched to fill the window when presented.

pub mod orbit;

pub use orbit::{OrbitControls, PointerInput};

use crate::config::{ControlsConfig, ViewerConfig};
use crate::rasterizer::{render_mesh, Camera, Color, Framebuffer, Light, RasterSettings, RasterStats, Vec3};
use crate::scene::{MeshObject, Scene};
use macroquad::prelude::{draw_texture_ex, DrawTextureParams, FilterMode, Texture2D, Vec2, WHITE};

pub struct Viewport {
    pub scene: Scene,
    pub camera: Camera,
    pub orbit: OrbitControls,
    framebuffer: Framebuffer,
    settings: RasterSettings,
    render_scale: f32,
    window_size: (f32, f32),
    running: bool,
}

impl Viewport {
    pub fn new(config: &ViewerConfig, width: f32, height: f32) -> Self {
        let cam_cfg = &config.camera;
        let mut camera = Camera::new(cam_cfg.fov, aspect_of(width, height), cam_cfg.near, cam_cfg.far);
        camera.position = Vec3::from(cam_cfg.position);
        camera.look_at(Vec3::ZERO);

        let scene_cfg = &config.scene;
        let mut scene = Scene::new(Color::from_hex(scene_cfg.background));
        scene.add_light(Light::ambient(Color::WHITE, scene_cfg.ambient_intensity));
        scene.add_light(Light::directional(
            Color::WHITE,
            scene_cfg.directional_intensity,
            Vec3::from(scene_cfg.directional_position),
            Vec3::ZERO,
        ));

        let render_scale = config.display.render_scale;
        let (fb_w, fb_h) = framebuffer_size(width, height, render_scale);
        Self {
            scene,
            camera,
            orbit: OrbitControls::new(Vec3::ZERO),
            framebuffer: Framebuffer::new(fb_w, fb_h),
            settings: RasterSettings::default(),
            render_scale,
            window_size: (width, height),
            running: true,
        }
    }

    /// Track a new window size. Returns false if nothing changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if (width, height) == self.window_size || width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.window_size = (width, height);
        self.camera.set_aspect(aspect_of(width, height));
        let (fb_w, fb_h) = framebuffer_size(width, height, self.render_scale);
        self.framebuffer.resize(fb_w, fb_h);
        log::debug!("Viewport resized to {}x{} (framebuffer {}x{})", width, height, fb_w, fb_h);
        true
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Swap in a new model; lights stay
    pub fn set_mesh(&mut self, mesh: MeshObject) {
        let removed = self.scene.replace_mesh(mesh);
        if removed > 0 {
            log::debug!("Replaced {} previous mesh(es)", removed);
        }
    }

    pub fn handle_pointer(&mut self, input: &PointerInput, config: &ControlsConfig) -> bool {
        if !self.running {
            return false;
        }
        self.orbit.handle(input, &mut self.camera, config)
    }

    /// Draw the scene into the framebuffer. Does nothing after teardown.
    pub fn render(&mut self) -> RasterStats {
        if !self.running {
            return RasterStats::default();
        }

        self.framebuffer.clear(self.scene.background);
        let lights: Vec<Light> = self.scene.lights().cloned().collect();
        match self.scene.mesh() {
            Some(mesh) => render_mesh(
                &mut self.framebuffer,
                &mesh.geometry.positions,
                &mesh.geometry.faces,
                &mesh.model_matrix(),
                mesh.color,
                &self.camera,
                &lights,
                &self.settings,
            ),
            None => RasterStats::default(),
        }
    }

    /// Blit the framebuffer over the whole window
    pub fn present(&self) {
        if !self.running || self.framebuffer.width == 0 || self.framebuffer.height == 0 {
            return;
        }
        let fb = &self.framebuffer;
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Linear);

        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(self.window_size.0, self.window_size.1)),
                ..Default::default()
            },
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop rendering and release scene contents
    pub fn teardown(&mut self) {
        if self.running {
            self.running = false;
            self.scene.clear();
            self.framebuffer.resize(0, 0);
            log::info!("Viewport torn down");
        }
    }
}

fn aspect_of(width: f32, height: f32) -> f32 {
    if height > 0.0 {
        width / height
    } else {
        1.0
    }
}

fn framebuffer_size(width: f32, height: f32, scale: f32) -> (usize, usize) {
    let w = (width * scale).round().max(1.0) as usize;
    let h = (height * scale).round().max(1.0) as usize;
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_model;
    use crate::mesh::stl::tests::binary_stl;

    fn viewport() -> Viewport {
        Viewport::new(&ViewerConfig::default(), 800.0, 600.0)
    }

    #[test]
    fn test_initial_scene() {
        let vp = viewport();
        assert_eq!(vp.scene.lights().count(), 2);
        assert!(vp.scene.mesh().is_none());
        assert_eq!(vp.camera.position, Vec3::new(0.0, 0.0, 200.0));
        assert_eq!(vp.framebuffer().width, 400);
        assert_eq!(vp.framebuffer().height, 300);
    }

    #[test]
    fn test_resize_updates_aspect_and_framebuffer() {
        let mut vp = viewport();
        let before = *vp.camera.projection();
        assert!(vp.resize(1000.0, 500.0));
        assert!((vp.camera.aspect - 2.0).abs() < 1e-6);
        assert_ne!(*vp.camera.projection(), before);
        assert_eq!(vp.framebuffer().width, 500);
        assert_eq!(vp.framebuffer().height, 250);

        assert!(!vp.resize(1000.0, 500.0));
        assert!(!vp.resize(0.0, 500.0));
    }

    #[test]
    fn test_empty_scene_renders_background() {
        let mut vp = viewport();
        let stats = vp.render();
        assert_eq!(stats.triangles_in, 0);
        assert_eq!(vp.framebuffer().pixel(10, 10), Some([0xf0, 0xf0, 0xf0, 255]));
    }

    #[test]
    fn test_model_is_visible_at_center() {
        let mut vp = viewport();
        // Triangle facing +Z (toward the camera)
        let data = binary_stl(&[[[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]]]);
        let mesh = load_model("tri.stl", &data, &ViewerConfig::default().model).unwrap();
        vp.set_mesh(mesh);

        let stats = vp.render();
        assert_eq!(stats.triangles_drawn, 1);
        let (cx, cy) = (vp.framebuffer().width / 2, vp.framebuffer().height / 2);
        assert_ne!(vp.framebuffer().pixel(cx, cy), Some([0xf0, 0xf0, 0xf0, 255]));
    }

    #[test]
    fn test_teardown_stops_rendering() {
        let mut vp = viewport();
        vp.teardown();
        assert!(!vp.is_running());
        assert_eq!(vp.scene.child_count(), 0);
        assert_eq!(vp.render().triangles_in, 0);
        let press = PointerInput { left_down: true, ..Default::default() };
        assert!(!vp.handle_pointer(&press, &ControlsConfig::default()));
    }
}
