use crate::models::SelectedFile;
use crate::services::widget::UploadWidget;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 16;

/// Event sources for the three page controls. A `None` control is absent
/// from the page and simply gets no listener.
#[derive(Default)]
pub struct Controls {
    /// `#profile-picture-input` change events
    pub file_input: Option<mpsc::Receiver<Option<SelectedFile>>>,
    /// `#choose-file-btn` clicks
    pub choose_button: Option<mpsc::Receiver<()>>,
    /// `#take-photo-btn` clicks
    pub take_photo_button: Option<mpsc::Receiver<()>>,
}

/// Sending half of [`Controls::wired`], used to fire control events
pub struct ControlSenders {
    pub file_input: mpsc::Sender<Option<SelectedFile>>,
    pub choose_button: mpsc::Sender<()>,
    pub take_photo_button: mpsc::Sender<()>,
}

impl Controls {
    /// All three controls present
    pub fn wired() -> (Self, ControlSenders) {
        let (file_tx, file_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (choose_tx, choose_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (photo_tx, photo_rx) = mpsc::channel(CHANNEL_CAPACITY);

        (
            Self {
                file_input: Some(file_rx),
                choose_button: Some(choose_rx),
                take_photo_button: Some(photo_rx),
            },
            ControlSenders {
                file_input: file_tx,
                choose_button: choose_tx,
                take_photo_button: photo_tx,
            },
        )
    }
}

impl UploadWidget {
    /// Attach a listener to every control that is present. Each event is
    /// handled on its own task, so a second selection can arrive while an
    /// upload is in flight; the overlap policy decides what happens to it.
    pub fn bind(self: &Arc<Self>, controls: Controls) -> Vec<JoinHandle<()>> {
        let mut listeners = Vec::new();

        if let Some(mut rx) = controls.file_input {
            let widget = Arc::clone(self);
            listeners.push(tokio::spawn(async move {
                while let Some(file) = rx.recv().await {
                    let widget = Arc::clone(&widget);
                    tokio::spawn(async move {
                        widget.on_file_selected(file).await;
                    });
                }
            }));
        }

        if let Some(mut rx) = controls.choose_button {
            let widget = Arc::clone(self);
            listeners.push(tokio::spawn(async move {
                while rx.recv().await.is_some() {
                    let widget = Arc::clone(&widget);
                    tokio::spawn(async move {
                        widget.choose_file().await;
                    });
                }
            }));
        }

        if let Some(mut rx) = controls.take_photo_button {
            let widget = Arc::clone(self);
            listeners.push(tokio::spawn(async move {
                while rx.recv().await.is_some() {
                    let widget = Arc::clone(&widget);
                    tokio::spawn(async move {
                        widget.take_photo().await;
                    });
                }
            }));
        }

        tracing::debug!("Bound {} upload controls", listeners.len());
        listeners
    }
}
