use super::{Toast, ToastId, ToastKind, UploadView};
use std::sync::Mutex;

/// View for the CLI: toasts go to stdout, visual state to the log
pub struct TerminalView {
    csrf_token: Option<String>,
    image_source: Mutex<Option<String>>,
}

impl TerminalView {
    pub fn new(csrf_token: Option<String>) -> Self {
        Self {
            csrf_token,
            image_source: Mutex::new(None),
        }
    }

    /// Last image URL the widget displayed
    pub fn image_source(&self) -> Option<String> {
        self.image_source
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl UploadView for TerminalView {
    fn set_image_source(&self, src: &str) {
        tracing::info!("🖼️  Profile picture now at {}", src);
        *self.image_source.lock().unwrap_or_else(|e| e.into_inner()) = Some(src.to_string());
    }

    fn set_opacity(&self, opacity: f32) {
        tracing::debug!("Profile picture opacity set to {}", opacity);
    }

    fn set_spinner_visible(&self, visible: bool) {
        if visible {
            tracing::info!("⏳ Uploading...");
        } else {
            tracing::debug!("Spinner hidden");
        }
    }

    fn show_toast(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success => println!("✅ {}", toast.message),
            ToastKind::Error => eprintln!("❌ {}", toast.message),
        }
    }

    fn dismiss_toast(&self, id: ToastId) {
        tracing::trace!("Toast {:?} dismissed", id);
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf_token.clone()
    }
}
