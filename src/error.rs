use crate::utils::validation::ValidationError;
use thiserror::Error;

/// Fallback text for failures that carry no usable message
pub const DEFAULT_ERROR_MESSAGE: &str = "Error updating profile picture";

pub const NETWORK_ERROR_MESSAGE: &str = "Network response was not ok";

pub const CAMERA_UNSUPPORTED_MESSAGE: &str =
    "Camera access is not supported on this device or browser.";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Camera capture is not available")]
    CameraUnsupported,

    #[error("Could not read the selected file: {0}")]
    Picker(String),

    #[error("Configuration error: missing csrfmiddlewaretoken")]
    MissingCsrfToken,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Upload rejected by server: {0}")]
    Application(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            UploadError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            UploadError::HttpStatus(status.as_u16())
        } else {
            UploadError::Transport(e.to_string())
        }
    }
}

impl UploadError {
    /// Text shown to the user in the error toast
    pub fn toast_message(&self) -> String {
        let message = match self {
            UploadError::Validation(e) => e.message.clone(),
            UploadError::CameraUnsupported => CAMERA_UNSUPPORTED_MESSAGE.to_string(),
            UploadError::MissingCsrfToken => {
                "Upload is misconfigured: the page has no CSRF token.".to_string()
            }
            UploadError::HttpStatus(_) => NETWORK_ERROR_MESSAGE.to_string(),
            UploadError::Picker(msg)
            | UploadError::Transport(msg)
            | UploadError::Decode(msg)
            | UploadError::Application(msg) => msg.clone(),
        };

        if message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}
