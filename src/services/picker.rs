use crate::models::SelectedFile;
use anyhow::Result;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// Camera to request when capturing, mirrors the input's `capture` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Front-facing camera
    User,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::User => "user",
        }
    }
}

/// Trait for file picker implementations
#[async_trait::async_trait]
pub trait FilePicker: Send + Sync {
    /// Whether the host exposes media-device capture
    fn camera_supported(&self) -> bool;

    /// Open the picker. `None` clears any capture intent.
    /// Resolves to `None` when the user picked nothing.
    async fn pick(&self, capture: Option<CaptureMode>) -> Result<Option<SelectedFile>>;
}

/// Picker backed by a path given on the command line. Has no camera.
pub struct PathPicker {
    path: Option<PathBuf>,
}

impl PathPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl FilePicker for PathPicker {
    fn camera_supported(&self) -> bool {
        false
    }

    async fn pick(&self, capture: Option<CaptureMode>) -> Result<Option<SelectedFile>> {
        if let Some(mode) = capture {
            tracing::warn!("Capture mode '{}' requested from a path picker", mode.as_str());
        }
        match &self.path {
            Some(path) => Ok(Some(SelectedFile::from_path(path).await?)),
            None => Ok(None),
        }
    }
}

/// Picker that hands out queued files and records how it was opened
#[derive(Default)]
pub struct MemoryPicker {
    camera: bool,
    queue: Mutex<VecDeque<SelectedFile>>,
    opened: Mutex<Vec<Option<CaptureMode>>>,
}

impl MemoryPicker {
    pub fn new(camera: bool) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn push(&self, file: SelectedFile) {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(file);
    }

    /// Capture intent of every `pick` call so far
    pub fn opened(&self) -> Vec<Option<CaptureMode>> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl FilePicker for MemoryPicker {
    fn camera_supported(&self) -> bool {
        self.camera
    }

    async fn pick(&self, capture: Option<CaptureMode>) -> Result<Option<SelectedFile>> {
        self.opened
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(capture);
        Ok(self
            .queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front())
    }
}
