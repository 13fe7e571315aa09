use anyhow::{Context, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Status value the profile endpoint returns on success
pub const STATUS_SUCCESS: &str = "success";

/// An image picked or captured for upload. Lives for one upload attempt.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Reads a file from disk, detecting its MIME type from magic bytes
    /// and falling back to the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let mime_type = detect_mime_type(&bytes, &name);
        tracing::debug!("Loaded {} ({} bytes, {})", name, bytes.len(), mime_type);

        Ok(Self::new(name, mime_type, Bytes::from(bytes)))
    }
}

/// Detect MIME type using infer, then the extension, then octet-stream
pub fn detect_mime_type(bytes: &[u8], filename: &str) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let guessed = match extension.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "txt" => mime::TEXT_PLAIN,
        "pdf" => mime::APPLICATION_PDF,
        _ => mime::APPLICATION_OCTET_STREAM,
    };
    guessed.essence_str().to_string()
}

/// Multipart payload for one upload, built fresh per attempt
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub csrf_token: String,
}

/// JSON body returned by the profile endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Success {
        image_url: Option<String>,
        /// Storage name the server gave the picture, e.g. `profile_pics/user_1.png`
        stored_name: Option<String>,
    },
    Failure { message: String },
}

impl ServerResponse {
    pub fn into_result(self) -> UploadResult {
        if self.status == STATUS_SUCCESS {
            UploadResult::Success {
                image_url: self.profile_picture_url,
                stored_name: self.profile_picture_name,
            }
        } else {
            UploadResult::Failure {
                message: self
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| crate::error::DEFAULT_ERROR_MESSAGE.to_string()),
            }
        }
    }
}
