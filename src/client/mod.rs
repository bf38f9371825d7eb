//! Upload / convert service client
//!
//! Talks to the model service over four endpoints:
//! - `POST /upload` (multipart, field `file`) -> `{ filename }`
//! - `GET /uploads/{filename}` -> raw model bytes
//! - `POST /convert` (JSON `{ filename }`) -> `{ obj_filename }`
//! - `GET /exports/{obj_filename}` -> opened in the system browser
//!
//! HTTP goes through the `Transport` trait so the session can be driven
//! against a fake service. Every call is blocking; `async_ops` moves them
//! onto worker threads.

pub mod async_ops;
pub mod navigator;
pub mod transport;

pub use async_ops::{AsyncOp, AsyncResult, PendingConvert, PendingModelLoad, PendingUpload};
pub use navigator::Navigator;
pub use transport::{MultipartFile, Transport};

use crate::mesh::MeshError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("{0} is not an STL file")]
    NotStl(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("download exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not open browser: {0}")]
    Browser(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("background task ended without a result")]
    TaskFailed,
    #[cfg(target_arch = "wasm32")]
    #[error("not available in browser")]
    Unsupported,
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e.to_string())
    }
}

/// The user's chosen local model file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// File name as shown to the user and sent to the service
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path: path.to_path_buf(),
            name,
        })
    }

    /// Case-insensitive `.stl` extension check
    pub fn is_stl(&self) -> bool {
        has_stl_extension(&self.name)
    }
}

pub fn has_stl_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".stl")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    /// Name the service stored the upload under
    pub filename: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConvertResponse {
    #[serde(default)]
    pub obj_filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ConvertResponse {
    /// The converted file name, if the service produced a usable one
    pub fn converted(&self) -> Option<&str> {
        self.obj_filename.as_deref().filter(|s| !s.is_empty())
    }
}

/// Client for the model service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn convert_url(&self) -> String {
        format!("{}/convert", self.base_url)
    }

    pub fn model_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url, urlencoding::encode(filename))
    }

    pub fn export_url(&self, obj_filename: &str) -> String {
        format!("{}/exports/{}", self.base_url, urlencoding::encode(obj_filename))
    }

    /// Send the selected file as multipart form data
    pub fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, ClientError> {
        let bytes = std::fs::read(&file.path)?;
        let part = MultipartFile {
            field: "file".to_string(),
            file_name: file.name.clone(),
            content_type: "application/octet-stream".to_string(),
            bytes,
        };

        let json = self.transport.post_multipart(&self.upload_url(), &part)?;
        let response: UploadResponse = serde_json::from_value(json).map_err(|e| {
            if e.to_string().contains("missing field `filename`") {
                ClientError::MissingField("filename")
            } else {
                ClientError::Decode(e.to_string())
            }
        })?;

        if response.filename.is_empty() {
            return Err(ClientError::MissingField("filename"));
        }
        Ok(response)
    }

    /// Download an uploaded model's raw bytes
    pub fn fetch_model(&self, filename: &str) -> Result<Vec<u8>, ClientError> {
        self.transport.get(&self.model_url(filename))
    }

    /// Ask the service to convert an uploaded STL to OBJ
    pub fn convert(&self, filename: &str) -> Result<ConvertResponse, ClientError> {
        let body = serde_json::json!({ "filename": filename });
        let json = self.transport.post_json(&self.convert_url(), &body)?;
        serde_json::from_value(json).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
