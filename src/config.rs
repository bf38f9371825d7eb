//! Viewer configuration
//!
//! Defaults reproduce the stock viewer (localhost:5000, 100 unit models,
//! π/8 rotation steps, 10 unit zoom/pan steps). A RON file can override any
//! subset of fields; `MESH_VIEWER_BASE_URL` overrides the server origin.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "MESH_VIEWER_CONFIG";
/// Environment variable overriding `server.base_url`
pub const BASE_URL_ENV: &str = "MESH_VIEWER_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin of the upload/convert service, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 200.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// 0xRRGGBB
    pub background: u32,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: 0xf0f0f0,
            ambient_intensity: 0.5,
            directional_intensity: 0.7,
            directional_position: [0.0, 50.0, 100.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Largest bounding-box extent after normalization
    pub target_size: f32,
    /// 0xRRGGBB
    pub material_color: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            target_size: 100.0,
            material_color: 0x606060,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Model yaw change per Rotate click, radians
    pub rotate_step: f32,
    /// Camera z change per Zoom click
    pub zoom_step: f32,
    /// Camera x/y change per Pan click
    pub pan_step: f32,
    /// Orbit radians per pixel of drag
    pub orbit_rotate_speed: f32,
    /// Orbit pan distance per pixel, as a fraction of the target distance
    pub orbit_pan_speed: f32,
    /// Distance multiplier per wheel notch
    pub orbit_zoom_factor: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_step: std::f32::consts::PI / 8.0,
            zoom_step: 10.0,
            pan_step: 10.0,
            orbit_rotate_speed: 0.005,
            orbit_pan_speed: 0.002,
            orbit_zoom_factor: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Framebuffer resolution relative to the window (0.1 - 1.0)
    pub render_scale: f32,
    /// How long status messages stay on screen
    pub status_duration_secs: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            render_scale: 0.5,
            status_duration_secs: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub server: ServerConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub model: ModelConfig,
    pub controls: ControlsConfig,
    pub display: DisplayConfig,
}

impl ViewerConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: Self = ron::from_str(s)?;
        config.sanitize();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Config file location: `$MESH_VIEWER_CONFIG`, else
    /// `<config dir>/mesh-viewer/config.ron`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|d| d.join("mesh-viewer").join("config.ron"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    /// Defaults, then the config file if present, then environment overrides.
    /// A broken config file is reported and ignored.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from_path(&path) {
                Ok(c) => {
                    log::info!("Loaded config from {}", path.display());
                    c
                }
                Err(e) => {
                    log::warn!("Ignoring config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        config.apply_overrides(std::env::var(BASE_URL_ENV).ok());
        config
    }

    pub fn apply_overrides(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.server.base_url = url;
        }
        self.sanitize();
    }

    fn sanitize(&mut self) {
        let trimmed = self.server.base_url.trim().trim_end_matches('/').to_string();
        self.server.base_url = trimmed;
        self.display.render_scale = self.display.render_scale.clamp(0.1, 1.0);
    }
}
