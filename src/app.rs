//! Viewer session
//!
//! One `ViewerSession` owns everything the viewer knows: the viewport, the
//! selected file, the remote filename, pending network work and the status
//! notice. The frame loop drives it through `poll_tasks`, `render` and the
//! action methods; `teardown` ends it.
//!
//! Network work runs in two single slots. The model slot holds either an
//! upload or a load; starting either drops whatever was in flight. Export has
//! its own slot with the same rule. A dropped task's result is discarded.

use crate::client::async_ops::{convert_async, load_model_async, upload_async};
use crate::client::{
    ApiClient, ClientError, Navigator, PendingConvert, PendingModelLoad, PendingUpload, SelectedFile,
    Transport,
};
use crate::config::ViewerConfig;
use crate::controls::TransformAction;
use crate::rasterizer::RasterStats;
use crate::ui::{ShellView, StatusLevel};
use crate::viewport::{PointerInput, Viewport};
use std::sync::Arc;

pub const MSG_SELECT_FILE: &str = "Please select a file";
pub const MSG_UPLOAD_OK: &str = "File uploaded successfully";
pub const MSG_UPLOAD_FAILED: &str = "Error uploading file";
pub const MSG_LOAD_FAILED: &str = "Error loading model";
pub const MSG_EXPORT_NEEDS_STL: &str = "Please upload a valid STL file before exporting.";
pub const MSG_CONVERT_FAILED: &str = "Error during conversion.";
pub const MSG_EXPORT_FAILED: &str = "Error exporting file.";

/// A user-facing message shown until `expires_at`
#[derive(Debug, Clone, PartialEq)]
pub struct StatusNotice {
    pub text: String,
    pub level: StatusLevel,
    pub expires_at: f64,
}

/// Contents of the model slot
enum ModelTask {
    Upload(PendingUpload),
    Load(PendingModelLoad),
}

pub struct ViewerSession {
    config: ViewerConfig,
    viewport: Option<Viewport>,
    client: ApiClient,
    navigator: Box<dyn Navigator>,
    selected_file: Option<SelectedFile>,
    /// Server-side name of `selected_file`, once uploaded
    remote_filename: Option<String>,
    model_task: Option<ModelTask>,
    export_task: Option<PendingConvert>,
    status: Option<StatusNotice>,
    now: f64,
    running: bool,
}

impl ViewerSession {
    pub fn new(
        config: ViewerConfig,
        transport: Arc<dyn Transport>,
        navigator: Box<dyn Navigator>,
        width: f32,
        height: f32,
    ) -> Self {
        let client = ApiClient::new(&config.server.base_url, transport);
        let viewport = Viewport::new(&config, width, height);
        log::info!("Viewer session started (service at {})", client.base_url());

        Self {
            config,
            viewport: Some(viewport),
            client,
            navigator,
            selected_file: None,
            remote_filename: None,
            model_task: None,
            export_task: None,
            status: None,
            now: 0.0,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn remote_filename(&self) -> Option<&str> {
        self.remote_filename.as_deref()
    }

    /// Upload or model load in flight
    pub fn is_loading(&self) -> bool {
        self.model_task.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.export_task.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.is_exporting()
    }

    // =========================================================================
    // Status notices
    // =========================================================================

    fn notify(&mut self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            StatusLevel::Info => log::info!("{}", text),
            StatusLevel::Warning => log::warn!("{}", text),
            StatusLevel::Error => log::error!("{}", text),
        }
        self.status = Some(StatusNotice {
            text,
            level,
            expires_at: self.now + self.config.display.status_duration_secs,
        });
    }

    /// The current notice, if it has not expired
    pub fn status(&self) -> Option<&StatusNotice> {
        self.status.as_ref().filter(|s| self.now < s.expires_at)
    }

    pub fn shell_view(&self) -> ShellView<'_> {
        ShellView {
            selected_file: self.selected_file.as_ref().map(|f| f.name.as_str()),
            loading: self.is_loading(),
            exporting: self.is_exporting(),
            status: self.status().map(|s| (s.text.as_str(), s.level)),
        }
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Remember the file chosen in the picker. A new selection has not been
    /// uploaded yet, so any remote filename is forgotten.
    pub fn select_file(&mut self, file: SelectedFile) {
        if !self.running {
            return;
        }
        log::info!("Selected {}", file.path.display());
        self.selected_file = Some(file);
        self.remote_filename = None;
    }

    /// Upload the selected file, then load what the server stored
    pub fn upload(&mut self) -> Result<(), ClientError> {
        if !self.running {
            return Ok(());
        }
        let Some(file) = self.selected_file.clone() else {
            self.notify(StatusLevel::Warning, MSG_SELECT_FILE);
            return Err(ClientError::NoFileSelected);
        };

        log::info!("Uploading {} to {}", file.name, self.client.upload_url());
        self.remote_filename = None;
        let pending = upload_async(&self.client, file);
        self.replace_model_task(ModelTask::Upload(pending));
        Ok(())
    }

    /// Fetch `filename` from the uploads endpoint and show it
    pub fn load_model(&mut self, filename: &str) {
        if !self.running {
            return;
        }
        log::info!("Loading {}", self.client.model_url(filename));
        let pending = load_model_async(&self.client, filename.to_string(), self.config.model.clone());
        self.replace_model_task(ModelTask::Load(pending));
    }

    fn replace_model_task(&mut self, task: ModelTask) {
        if let Some(old) = self.model_task.replace(task) {
            let name = match &old {
                ModelTask::Upload(p) => &p.file.name,
                ModelTask::Load(p) => &p.filename,
            };
            log::debug!("Dropping superseded model task for {}", name);
        }
    }

    /// Ask the service to convert the selected STL and open the result
    pub fn export(&mut self) -> Result<(), ClientError> {
        if !self.running {
            return Ok(());
        }
        let file = match &self.selected_file {
            Some(f) if f.is_stl() => f,
            Some(f) => {
                let name = f.name.clone();
                self.notify(StatusLevel::Warning, MSG_EXPORT_NEEDS_STL);
                return Err(ClientError::NotStl(name));
            }
            None => {
                self.notify(StatusLevel::Warning, MSG_EXPORT_NEEDS_STL);
                return Err(ClientError::NoFileSelected);
            }
        };

        let filename = self.remote_filename.clone().unwrap_or_else(|| file.name.clone());
        log::info!("Requesting conversion of {}", filename);
        if let Some(old) = self.export_task.replace(convert_async(&self.client, filename)) {
            log::debug!("Dropping superseded export of {}", old.filename);
        }
        Ok(())
    }

    /// Apply a transform button. Returns whether anything changed.
    pub fn apply(&mut self, action: TransformAction) -> bool {
        if !self.running {
            return false;
        }
        match &mut self.viewport {
            Some(vp) => action.apply(vp.scene.mesh_mut(), Some(&mut vp.camera), &self.config.controls),
            None => action.apply(None, None, &self.config.controls),
        }
    }

    pub fn handle_pointer(&mut self, input: &PointerInput) -> bool {
        match &mut self.viewport {
            Some(vp) if self.running => vp.handle_pointer(input, &self.config.controls),
            _ => false,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        match &mut self.viewport {
            Some(vp) if self.running => vp.resize(width, height),
            _ => false,
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the clock and collect finished background work
    pub fn poll_tasks(&mut self, now: f64) {
        self.now = now;
        if !self.running {
            return;
        }
        self.poll_model_task();
        self.poll_export_task();
    }

    fn poll_model_task(&mut self) {
        match self.model_task.take() {
            Some(ModelTask::Upload(mut pending)) => {
                if !pending.op.is_complete() {
                    self.model_task = Some(ModelTask::Upload(pending));
                    return;
                }
                match pending.op.take() {
                    Some(Ok(response)) => {
                        self.notify(StatusLevel::Info, MSG_UPLOAD_OK);
                        // Same path, not just same name
                        let still_selected = self.selected_file.as_ref() == Some(&pending.file);
                        if still_selected {
                            self.remote_filename = Some(response.filename.clone());
                        }
                        self.load_model(&response.filename);
                    }
                    Some(Err(e)) => {
                        log::error!("Upload of {} failed: {}", pending.file.name, e);
                        self.notify(StatusLevel::Error, MSG_UPLOAD_FAILED);
                    }
                    None => {}
                }
            }
            Some(ModelTask::Load(mut pending)) => {
                if !pending.op.is_complete() {
                    self.model_task = Some(ModelTask::Load(pending));
                    return;
                }
                match pending.op.take() {
                    Some(Ok(mesh)) => {
                        if let Some(vp) = &mut self.viewport {
                            vp.set_mesh(mesh);
                        }
                    }
                    Some(Err(e)) => {
                        log::error!("Loading {} failed: {}", pending.filename, e);
                        self.notify(StatusLevel::Error, MSG_LOAD_FAILED);
                    }
                    None => {}
                }
            }
            None => {}
        }
    }

    fn poll_export_task(&mut self) {
        let Some(mut pending) = self.export_task.take() else {
            return;
        };
        if !pending.op.is_complete() {
            self.export_task = Some(pending);
            return;
        }

        match pending.op.take() {
            Some(Ok(response)) => match response.converted() {
                Some(obj) => {
                    let url = self.client.export_url(obj);
                    if let Err(e) = self.navigator.open(&url) {
                        log::warn!("Could not open {}: {}", url, e);
                        self.notify(StatusLevel::Warning, format!("Download at {}", url));
                    }
                }
                None => {
                    log::error!(
                        "Conversion of {} returned no obj_filename (message: {:?})",
                        pending.filename,
                        response.message
                    );
                    self.notify(StatusLevel::Error, MSG_CONVERT_FAILED);
                }
            },
            Some(Err(e)) => {
                log::error!("Export of {} failed: {}", pending.filename, e);
                self.notify(StatusLevel::Error, MSG_EXPORT_FAILED);
            }
            None => {}
        }
    }

    pub fn render(&mut self) -> RasterStats {
        match &mut self.viewport {
            Some(vp) if self.running => vp.render(),
            _ => RasterStats::default(),
        }
    }

    pub fn present(&self) {
        if let Some(vp) = &self.viewport {
            vp.present();
        }
    }

    /// End the session: stop rendering, drop pending work, release the scene
    pub fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.model_task = None;
        self.export_task = None;
        if let Some(mut vp) = self.viewport.take() {
            vp.teardown();
        }
        log::info!("Viewer session ended");
    }
}
