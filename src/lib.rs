pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod view;

pub use config::{OverlapPolicy, UploaderConfig};
pub use error::UploadError;
pub use models::{SelectedFile, ServerResponse, UploadRequest, UploadResult};
pub use services::bindings::{ControlSenders, Controls};
pub use services::picker::{CaptureMode, FilePicker, MemoryPicker, PathPicker};
pub use services::transport::{HttpTransport, UploadTransport};
pub use services::widget::{UploadOutcome, UploadWidget};
pub use view::{MemoryView, TerminalView, Toast, ToastKind, UploadView};

use std::sync::Arc;

/// Widget wired to the real HTTP transport
pub fn create_widget(
    config: &UploaderConfig,
    view: Arc<dyn UploadView>,
    picker: Arc<dyn FilePicker>,
) -> Result<UploadWidget, UploadError> {
    let transport = Arc::new(HttpTransport::new(config)?);
    Ok(UploadWidget::new(config, view, picker, transport))
}
