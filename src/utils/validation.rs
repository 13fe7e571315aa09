use crate::models::SelectedFile;

/// Maximum profile picture size: 10 MiB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// MIME prefix every profile picture must carry
pub const IMAGE_MIME_PREFIX: &str = "image/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Size in MiB for messages: whole numbers stay bare, the rest get one decimal
pub fn format_megabytes(bytes: u64) -> String {
    if bytes % BYTES_PER_MB == 0 {
        format!("{}", bytes / BYTES_PER_MB)
    } else {
        format!("{:.1}", bytes as f64 / BYTES_PER_MB as f64)
    }
}

/// Validates file size against maximum limit
pub fn validate_file_size(size: u64, max_size: u64) -> Result<(), ValidationError> {
    if size > max_size {
        return Err(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size too large. Maximum size is {}MB.",
                format_megabytes(max_size)
            ),
        });
    }
    Ok(())
}

/// Validates that the claimed MIME type is an image type
pub fn validate_image_type(content_type: &str) -> Result<(), ValidationError> {
    if content_type.starts_with(IMAGE_MIME_PREFIX) {
        return Ok(());
    }

    tracing::debug!("Rejected non-image MIME type '{}'", content_type);
    Err(ValidationError {
        code: "INVALID_IMAGE_TYPE",
        message: "Please select an image file.".to_string(),
    })
}

/// Client-side checks run before any network activity, in order
pub fn validate_selection(file: &SelectedFile, max_size: u64) -> Result<(), ValidationError> {
    // 1. Size check
    validate_file_size(file.size(), max_size)?;

    // 2. Type check
    validate_image_type(&file.mime_type)?;

    Ok(())
}
