//! View seam for the upload widget.
//!
//! Every method must tolerate a missing element by doing nothing: a page
//! without a spinner or without a profile image still uploads. The one
//! exception is [`UploadView::csrf_token`], whose absence the widget turns
//! into a configuration error.

pub mod memory;
pub mod terminal;

pub use memory::MemoryView;
pub use terminal::TerminalView;

/// Opacity of the profile image while an upload is in flight
pub const LOADING_OPACITY: f32 = 0.5;

/// Opacity restored once the upload settles
pub const RESTORED_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

pub trait UploadView: Send + Sync {
    fn set_image_source(&self, src: &str);

    fn set_opacity(&self, opacity: f32);

    fn set_spinner_visible(&self, visible: bool);

    fn show_toast(&self, toast: &Toast);

    fn dismiss_toast(&self, id: ToastId);

    /// Value of the page's `csrfmiddlewaretoken` field, if the page has one
    fn csrf_token(&self) -> Option<String>;
}
