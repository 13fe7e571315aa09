use super::{Toast, ToastId, UploadView, RESTORED_OPACITY};
use std::sync::{Mutex, MutexGuard};

/// Headless page model. Elements start absent; builders add them.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<PageState>,
}

#[derive(Debug, Default, Clone)]
pub struct PageState {
    /// `None` when the page has no `.profile-picture` image
    pub image_source: Option<String>,
    pub image_opacity: Option<f32>,
    /// `None` when the page has no `#loading-spinner`
    pub spinner_visible: Option<bool>,
    pub csrf_token: Option<String>,
    /// Toasts currently attached to the document
    pub toasts: Vec<Toast>,
    /// Every toast ever shown, in order
    pub toast_history: Vec<Toast>,
    pub opacity_history: Vec<f32>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with profile image, spinner and token all present
    pub fn profile_page(image_source: &str, csrf_token: &str) -> Self {
        Self::new()
            .with_image(image_source)
            .with_spinner()
            .with_csrf_token(csrf_token)
    }

    pub fn with_image(self, src: &str) -> Self {
        {
            let mut state = self.lock();
            state.image_source = Some(src.to_string());
            state.image_opacity = Some(RESTORED_OPACITY);
        }
        self
    }

    pub fn with_spinner(self) -> Self {
        self.lock().spinner_visible = Some(false);
        self
    }

    pub fn with_csrf_token(self, token: &str) -> Self {
        self.lock().csrf_token = Some(token.to_string());
        self
    }

    pub fn snapshot(&self) -> PageState {
        self.lock().clone()
    }

    pub fn image_source(&self) -> Option<String> {
        self.lock().image_source.clone()
    }

    pub fn image_opacity(&self) -> Option<f32> {
        self.lock().image_opacity
    }

    pub fn spinner_visible(&self) -> Option<bool> {
        self.lock().spinner_visible
    }

    pub fn visible_toasts(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    pub fn toast_history(&self) -> Vec<Toast> {
        self.lock().toast_history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UploadView for MemoryView {
    fn set_image_source(&self, src: &str) {
        let mut state = self.lock();
        if state.image_source.is_some() {
            state.image_source = Some(src.to_string());
        }
    }

    fn set_opacity(&self, opacity: f32) {
        let mut state = self.lock();
        if state.image_opacity.is_some() {
            state.image_opacity = Some(opacity);
            state.opacity_history.push(opacity);
        }
    }

    fn set_spinner_visible(&self, visible: bool) {
        let mut state = self.lock();
        if state.spinner_visible.is_some() {
            state.spinner_visible = Some(visible);
        }
    }

    fn show_toast(&self, toast: &Toast) {
        let mut state = self.lock();
        state.toasts.push(toast.clone());
        state.toast_history.push(toast.clone());
    }

    fn dismiss_toast(&self, id: ToastId) {
        self.lock().toasts.retain(|t| t.id != id);
    }

    fn csrf_token(&self) -> Option<String> {
        self.lock().csrf_token.clone()
    }
}
