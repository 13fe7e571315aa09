use crate::view::{Toast, ToastId, ToastKind, UploadView};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{Duration, sleep};

/// Shows toasts through the view and removes each after `duration`
pub struct ToastNotifier {
    view: Arc<dyn UploadView>,
    duration: Duration,
    next_id: AtomicU64,
}

impl ToastNotifier {
    pub fn new(view: Arc<dyn UploadView>, duration: Duration) -> Self {
        Self {
            view,
            duration,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.notify(ToastKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.notify(ToastKind::Error, message.into())
    }

    /// Must be called from within a tokio runtime
    pub fn notify(&self, kind: ToastKind, message: String) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.view.show_toast(&Toast { id, kind, message });

        let view = Arc::clone(&self.view);
        let duration = self.duration;
        tokio::spawn(async move {
            sleep(duration).await;
            view.dismiss_toast(id);
        });

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    #[tokio::test(start_paused = true)]
    async fn test_toast_dismissed_after_duration() {
        let view = Arc::new(MemoryView::new());
        let notifier = ToastNotifier::new(view.clone(), Duration::from_secs(3));

        let first = notifier.success("saved");
        let second = notifier.error("failed");
        assert_ne!(first, second);
        assert_eq!(view.visible_toasts().len(), 2);

        sleep(Duration::from_millis(2900)).await;
        assert_eq!(view.visible_toasts().len(), 2);

        sleep(Duration::from_millis(200)).await;
        assert!(view.visible_toasts().is_empty());
        assert_eq!(view.toast_history().len(), 2);
    }
}
