use crate::config::{OverlapPolicy, UploaderConfig};
use crate::error::UploadError;
use crate::models::{SelectedFile, UploadRequest, UploadResult};
use crate::services::notifier::ToastNotifier;
use crate::services::picker::{CaptureMode, FilePicker};
use crate::services::transport::UploadTransport;
use crate::services::upload_state::{AttemptId, Step, UploadEvent, UploadState};
use crate::utils::cache_bust::cache_busted_url;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::validation::validate_selection;
use crate::view::{LOADING_OPACITY, RESTORED_OPACITY, UploadView};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

pub const SUCCESS_MESSAGE: &str = "Profile picture updated successfully";

/// How a single selection ended
#[derive(Debug)]
pub enum UploadOutcome {
    /// The picker closed without a file
    NoFile,
    /// Another upload was in flight and the policy rejects overlaps
    Ignored,
    /// Failed a client-side check; nothing was sent
    Rejected(UploadError),
    Succeeded {
        image_url: Option<String>,
        stored_name: Option<String>,
    },
    Failed(UploadError),
    /// A newer selection replaced this attempt; its response was dropped
    Superseded,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded { .. })
    }
}

/// Profile picture upload widget: pick or capture, validate, submit, reflect.
pub struct UploadWidget {
    view: Arc<dyn UploadView>,
    picker: Arc<dyn FilePicker>,
    transport: Arc<dyn UploadTransport>,
    clock: Arc<dyn Clock>,
    notifier: ToastNotifier,
    max_file_size: u64,
    policy: OverlapPolicy,
    state: Mutex<UploadState>,
    next_attempt: AtomicU64,
}

impl UploadWidget {
    pub fn new(
        config: &UploaderConfig,
        view: Arc<dyn UploadView>,
        picker: Arc<dyn FilePicker>,
        transport: Arc<dyn UploadTransport>,
    ) -> Self {
        Self {
            notifier: ToastNotifier::new(view.clone(), config.toast_duration),
            view,
            picker,
            transport,
            clock: Arc::new(SystemClock),
            max_file_size: config.max_file_size,
            policy: config.overlap_policy,
            state: Mutex::new(UploadState::Idle),
            next_attempt: AtomicU64::new(1),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> UploadState {
        *self.lock_state()
    }

    /// Open the picker without a capture intent
    pub async fn choose_file(&self) -> UploadOutcome {
        self.pick(None).await
    }

    /// Open the picker asking for the front camera, if the host has one
    pub async fn take_photo(&self) -> UploadOutcome {
        if !self.picker.camera_supported() {
            let err = UploadError::CameraUnsupported;
            tracing::warn!("Camera capture requested but not supported");
            self.notifier.error(err.toast_message());
            return UploadOutcome::Rejected(err);
        }
        self.pick(Some(CaptureMode::User)).await
    }

    async fn pick(&self, capture: Option<CaptureMode>) -> UploadOutcome {
        match self.picker.pick(capture).await {
            Ok(file) => self.on_file_selected(file).await,
            Err(e) => {
                tracing::error!("File picker failed: {:#}", e);
                let err = UploadError::Picker(e.to_string());
                self.notifier.error(err.toast_message());
                UploadOutcome::Rejected(err)
            }
        }
    }

    /// Entry point for a file chosen in the picker
    pub async fn on_file_selected(&self, file: Option<SelectedFile>) -> UploadOutcome {
        let Some(file) = file else {
            return UploadOutcome::NoFile;
        };

        let (attempt, csrf_token) = {
            let mut state = self.lock_state();
            if state.apply(UploadEvent::FileChosen, self.policy) != Step::Advanced {
                tracing::warn!(
                    "Ignoring {}: upload {:?} still in flight",
                    file.name,
                    state.current_attempt()
                );
                return UploadOutcome::Ignored;
            }

            match self.check_selection(&file) {
                Ok(token) => {
                    let attempt = AttemptId(self.next_attempt.fetch_add(1, Ordering::Relaxed));
                    state.apply(UploadEvent::ValidationPassed(attempt), self.policy);
                    (attempt, token)
                }
                Err(err) => {
                    state.apply(UploadEvent::ValidationFailed, self.policy);
                    drop(state);
                    tracing::warn!("Rejected {}: {}", file.name, err);
                    self.notifier.error(err.toast_message());
                    return UploadOutcome::Rejected(err);
                }
            }
        };

        self.submit(attempt, UploadRequest { file, csrf_token }).await
    }

    /// Validation then the token precondition; yields the token to send
    fn check_selection(&self, file: &SelectedFile) -> Result<String, UploadError> {
        validate_selection(file, self.max_file_size)?;

        self.view
            .csrf_token()
            .filter(|token| !token.is_empty())
            .ok_or(UploadError::MissingCsrfToken)
    }

    async fn submit(&self, attempt: AttemptId, request: UploadRequest) -> UploadOutcome {
        self.view.set_opacity(LOADING_OPACITY);
        self.view.set_spinner_visible(true);

        tracing::info!(
            "📤 Uploading {} ({} bytes) as attempt {}",
            request.file.name,
            request.file.size(),
            attempt.0
        );

        let result = self
            .transport
            .send(request)
            .await
            .and_then(|response| match response.into_result() {
                UploadResult::Success {
                    image_url,
                    stored_name,
                } => Ok((image_url, stored_name)),
                UploadResult::Failure { message } => Err(UploadError::Application(message)),
            });

        let mut state = self.lock_state();
        if state.apply(UploadEvent::ResponseReceived(attempt), self.policy) != Step::Advanced {
            tracing::debug!("Discarding response for superseded attempt {}", attempt.0);
            return UploadOutcome::Superseded;
        }

        let outcome = match result {
            Ok((image_url, stored_name)) => {
                if let Some(url) = &image_url {
                    self.view
                        .set_image_source(&cache_busted_url(url, self.clock.now_millis()));
                }
                tracing::info!(
                    "✅ Profile picture updated to {} (attempt {})",
                    stored_name.as_deref().unwrap_or("<unnamed>"),
                    attempt.0
                );
                self.notifier.success(SUCCESS_MESSAGE);
                UploadOutcome::Succeeded {
                    image_url,
                    stored_name,
                }
            }
            Err(err) => {
                tracing::error!("Error updating profile picture: {}", err);
                self.notifier.error(err.toast_message());
                UploadOutcome::Failed(err)
            }
        };

        self.view.set_opacity(RESTORED_OPACITY);
        self.view.set_spinner_visible(false);
        state.apply(UploadEvent::RequestSettled(attempt), self.policy);

        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, UploadState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
