//! HTTP transport
//!
//! On native: blocking requests through a shared `ureq::Agent`.
//! On WASM: not wired up, every call returns `ClientError::Unsupported`.

use super::ClientError;

/// Upper bound on a downloaded model
pub const MAX_DOWNLOAD_BYTES: u64 = 256 * 1024 * 1024;

/// One file part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartFile {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MultipartFile {
    /// Encode as a complete form body with a single part
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.bytes.len() + 256);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(&self.field),
                escape_quoted(&self.file_name)
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", self.content_type).as_bytes());
        body.extend_from_slice(&self.bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        body
    }

    pub fn content_type_header(boundary: &str) -> String {
        format!("multipart/form-data; boundary={}", boundary)
    }
}

fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace(['\r', '\n'], " ")
}

/// Blocking HTTP operations used by `ApiClient`
pub trait Transport: Send + Sync {
    /// GET and return the raw body
    fn get(&self, url: &str) -> Result<Vec<u8>, ClientError>;

    /// POST a JSON body and decode a JSON reply
    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value, ClientError>;

    /// POST a single-file multipart form and decode a JSON reply
    fn post_multipart(&self, url: &str, file: &MultipartFile) -> Result<serde_json::Value, ClientError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Native implementation (uses ureq for HTTP requests)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
pub struct UreqTransport {
    agent: ureq::Agent,
    max_download: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl UreqTransport {
    pub fn new(timeout: std::time::Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            max_download: MAX_DOWNLOAD_BYTES,
        }
    }

    /// Override the download cap
    pub fn with_max_download(mut self, bytes: u64) -> Self {
        self.max_download = bytes;
        self
    }

    /// Convert ureq error to ClientError
    fn convert_error(e: ureq::Error) -> ClientError {
        match e {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                ClientError::Http { status: code, body }
            }
            other => ClientError::Network(other.to_string()),
        }
    }

    fn read_json(response: ureq::Response) -> Result<serde_json::Value, ClientError> {
        response
            .into_json::<serde_json::Value>()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        use std::io::Read;

        let response = self.agent.get(url).call().map_err(Self::convert_error)?;
        let mut bytes = Vec::new();
        // One byte past the cap tells an oversized body from one that fits exactly
        response
            .into_reader()
            .take(self.max_download.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if bytes.len() as u64 > self.max_download {
            return Err(ClientError::TooLarge {
                limit: self.max_download,
            });
        }
        log::debug!("GET {} -> {} bytes", url, bytes.len());
        Ok(bytes)
    }

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value, ClientError> {
        let response = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(Self::convert_error)?;
        Self::read_json(response)
    }

    fn post_multipart(&self, url: &str, file: &MultipartFile) -> Result<serde_json::Value, ClientError> {
        let boundary = format!("----mesh-viewer-{:016x}", rand::random::<u64>());
        let body = file.encode(&boundary);
        log::debug!("POST {} ({} byte form)", url, body.len());

        let response = self
            .agent
            .post(url)
            .set("Content-Type", &MultipartFile::content_type_header(&boundary))
            .send_bytes(&body)
            .map_err(Self::convert_error)?;
        Self::read_json(response)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WASM stub
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
pub struct UreqTransport;

#[cfg(target_arch = "wasm32")]
impl UreqTransport {
    pub fn new(_timeout: std::time::Duration) -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl Transport for UreqTransport {
    fn get(&self, _url: &str) -> Result<Vec<u8>, ClientError> {
        Err(ClientError::Unsupported)
    }

    fn post_json(&self, _url: &str, _body: &serde_json::Value) -> Result<serde_json::Value, ClientError> {
        Err(ClientError::Unsupported)
    }

    fn post_multipart(&self, _url: &str, _file: &MultipartFile) -> Result<serde_json::Value, ClientError> {
        Err(ClientError::Unsupported)
    }
}
