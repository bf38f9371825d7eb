//! Mesh Viewer: upload, inspect and convert 3D models
//!
//! Pick a local STL or OBJ file, upload it to the model service, and view the
//! stored copy in a software-rendered 3D viewport:
//! - Orbit, pan and zoom with the mouse
//! - Step rotation / zoom / pan buttons
//! - STL -> OBJ conversion through the service, opened in the system browser

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod client;
mod config;
mod controls;
mod loader;
mod mesh;
mod rasterizer;
mod scene;
mod ui;
mod viewport;

use app::ViewerSession;
use client::navigator::BrowserNavigator;
use client::transport::UreqTransport;
use client::SelectedFile;
use config::ViewerConfig;
use macroquad::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use ui::{draw_shell, MouseState, ShellAction, ShellLayout, UiContext};
use viewport::PointerInput;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Mesh Viewer v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::load();
    let transport = Arc::new(UreqTransport::new(Duration::from_secs(config.server.timeout_secs)));
    let mut session = ViewerSession::new(
        config,
        transport,
        Box::new(BrowserNavigator),
        screen_width(),
        screen_height(),
    );

    let mut ui_ctx = UiContext::new();

    // Closing the window goes through teardown instead of exiting mid-frame
    prevent_quit();

    log::info!("=== Mesh Viewer v{} ===", VERSION);

    while session.is_running() {
        if is_quit_requested() {
            session.teardown();
            break;
        }

        let screen_w = screen_width();
        let screen_h = screen_height();
        session.poll_tasks(get_time());
        session.resize(screen_w, screen_h);

        let layout = ShellLayout::compute(screen_w, screen_h);
        let mouse = MouseState::poll();
        ui_ctx.begin_frame(mouse);

        let pointer = PointerInput {
            x: mouse.x,
            y: mouse.y,
            left_down: mouse.left_down,
            right_down: mouse.right_down,
            shift: mouse.shift,
            wheel: mouse.scroll,
            over_ui: layout.contains(mouse.x, mouse.y),
        };
        session.handle_pointer(&pointer);

        clear_background(BLACK);
        session.render();
        session.present();

        let actions = draw_shell(&mut ui_ctx, &layout, &session.shell_view());
        for action in actions {
            handle_action(&mut session, action);
        }

        next_frame().await;
    }
}

fn handle_action(session: &mut ViewerSession, action: ShellAction) {
    match action {
        ShellAction::ChooseFile => {
            if let Some(file) = pick_model_file() {
                session.select_file(file);
            }
        }
        ShellAction::Upload => {
            if let Err(e) = session.upload() {
                log::debug!("Upload not started: {}", e);
            }
        }
        ShellAction::Export => {
            if let Err(e) = session.export() {
                log::debug!("Export not started: {}", e);
            }
        }
        ShellAction::Transform(t) => {
            session.apply(t);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_model_file() -> Option<SelectedFile> {
    let path = rfd::FileDialog::new()
        .add_filter("3D Model", &["stl", "STL", "obj", "OBJ"])
        .add_filter("All files", &["*"])
        .pick_file()?;
    SelectedFile::from_path(&path)
}

#[cfg(target_arch = "wasm32")]
fn pick_model_file() -> Option<SelectedFile> {
    log::warn!("File picking is not available in browser");
    None
}
