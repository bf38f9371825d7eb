//! Opening exported files outside the viewer

use super::ClientError;

/// Something that can show a URL to the user
pub trait Navigator {
    fn open(&self, url: &str) -> Result<(), ClientError>;
}

/// Opens URLs in the system browser
pub struct BrowserNavigator;

#[cfg(not(target_arch = "wasm32"))]
impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        log::info!("Opening {}", url);
        webbrowser::open(url).map_err(|e| ClientError::Browser(e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn open(&self, _url: &str) -> Result<(), ClientError> {
        Err(ClientError::Unsupported)
    }
}
