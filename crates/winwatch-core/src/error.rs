use std::io;
use std::path::PathBuf;

use winwatch_types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Window {0} not found")]
    WindowNotFound(WindowId),

    #[error("Capture failed: {0}")]
    Failed(String),

    #[error("Captured image is empty")]
    EmptyImage,
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("Recognition failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Window closed or no longer available")]
    WindowClosed,

    #[error("Failed to create screenshot folder {path}: {source}")]
    FolderCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidUserInput(String),

    #[error("Tick task failed: {0}")]
    TickTask(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl MonitorError {
    /// Process exit code for a session that ended with this error
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::WindowClosed => 0,
            _ => 1,
        }
    }
}
