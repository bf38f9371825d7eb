//! Async Operations
//!
//! Runs service calls on background threads so the render loop never blocks.
//! Each pending operation is polled once per frame.

use super::{ApiClient, ClientError, ConvertResponse, SelectedFile, UploadResponse};
use crate::config::ModelConfig;
use crate::scene::MeshObject;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// Result type for async operations
pub type AsyncResult<T> = Result<T, ClientError>;

/// A handle to a pending async operation that can be polled
#[cfg(not(target_arch = "wasm32"))]
pub struct AsyncOp<T> {
    receiver: Receiver<AsyncResult<T>>,
    result: Option<AsyncResult<T>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + 'static> AsyncOp<T> {
    /// Run `work` on its own thread
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> AsyncResult<T> + Send + 'static,
    {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            // Receiver may already be gone if the operation was superseded
            let _ = sender.send(work());
        });
        Self {
            receiver,
            result: None,
        }
    }

    /// Check if the operation has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Worker panicked before sending
                self.result = Some(Err(ClientError::TaskFailed));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<AsyncResult<T>> {
        if self.result.is_none() {
            self.is_complete();
        }
        self.result
    }
}

// WASM has no threads: the work runs inline and the op is complete at once.
#[cfg(target_arch = "wasm32")]
pub struct AsyncOp<T> {
    result: Option<AsyncResult<T>>,
}

#[cfg(target_arch = "wasm32")]
impl<T: Send + 'static> AsyncOp<T> {
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> AsyncResult<T> + Send + 'static,
    {
        Self {
            result: Some(work()),
        }
    }

    pub fn is_complete(&mut self) -> bool {
        true
    }

    pub fn take(self) -> Option<AsyncResult<T>> {
        self.result
    }
}

/// Pending upload of a local file
pub struct PendingUpload {
    pub op: AsyncOp<UploadResponse>,
    pub file: SelectedFile,
}

/// Pending download + parse of an uploaded model
pub struct PendingModelLoad {
    pub op: AsyncOp<MeshObject>,
    pub filename: String,
}

/// Pending STL -> OBJ conversion
pub struct PendingConvert {
    pub op: AsyncOp<ConvertResponse>,
    pub filename: String,
}

/// Start uploading `file`
pub fn upload_async(client: &ApiClient, file: SelectedFile) -> PendingUpload {
    let client = client.clone();
    let local = file.clone();
    PendingUpload {
        op: AsyncOp::spawn(move || client.upload(&local)),
        file,
    }
}

/// Start fetching `filename` from the uploads endpoint and building a mesh from it
pub fn load_model_async(client: &ApiClient, filename: String, config: ModelConfig) -> PendingModelLoad {
    let client = client.clone();
    let name = filename.clone();
    PendingModelLoad {
        op: AsyncOp::spawn(move || {
            let bytes = client.fetch_model(&name)?;
            Ok(crate::loader::load_model(&name, &bytes, &config)?)
        }),
        filename,
    }
}

/// Start converting the uploaded `filename`
pub fn convert_async(client: &ApiClient, filename: String) -> PendingConvert {
    let client = client.clone();
    let name = filename.clone();
    PendingConvert {
        op: AsyncOp::spawn(move || client.convert(&name)),
        filename,
    }
}
