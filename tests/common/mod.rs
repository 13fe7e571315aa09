#![allow(dead_code)]

use bytes::Bytes;
use profile_picture_uploader::utils::clock::FixedClock;
use profile_picture_uploader::{
    MemoryPicker, MemoryView, SelectedFile, ServerResponse, UploadError, UploadRequest,
    UploadTransport, UploadWidget, UploaderConfig,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const TOKEN: &str = "test-csrf-token";
pub const DEFAULT_IMAGE: &str = "/static/images/default_profile.png";
pub const NOW_MILLIS: i64 = 1_700_000_000_000;

pub type Reply = Result<ServerResponse, UploadError>;

pub enum Scripted {
    Respond(Reply),
    /// Reply arrives when the test sends it
    Hold(oneshot::Receiver<Reply>),
}

/// Transport returning scripted replies in order and recording requests
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<UploadRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(reply));
    }

    pub fn hold(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted::Hold(rx));
        tx
    }

    pub fn requests(&self) -> Vec<UploadRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UploadTransport for ScriptedTransport {
    async fn send(&self, request: UploadRequest) -> Reply {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Respond(reply)) => reply,
            Some(Scripted::Hold(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(UploadError::Transport("reply dropped".to_string()))),
            None => Err(UploadError::Transport("no scripted reply".to_string())),
        }
    }
}

pub struct Harness {
    pub view: Arc<MemoryView>,
    pub picker: Arc<MemoryPicker>,
    pub transport: Arc<ScriptedTransport>,
    pub widget: UploadWidget,
}

pub fn harness(config: UploaderConfig, view: MemoryView, camera: bool) -> Harness {
    let view = Arc::new(view);
    let picker = Arc::new(MemoryPicker::new(camera));
    let transport = Arc::new(ScriptedTransport::new());
    let widget = UploadWidget::new(&config, view.clone(), picker.clone(), transport.clone())
        .with_clock(Arc::new(FixedClock(NOW_MILLIS)));

    Harness {
        view,
        picker,
        transport,
        widget,
    }
}

/// Profile page with every element present and the default config
pub fn profile_page() -> Harness {
    harness(
        UploaderConfig::default(),
        MemoryView::profile_page(DEFAULT_IMAGE, TOKEN),
        false,
    )
}

pub fn png(name: &str) -> SelectedFile {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 64]);
    SelectedFile::new(name, "image/png", Bytes::from(bytes))
}

pub fn success(url: &str) -> Reply {
    Ok(ServerResponse {
        status: "success".to_string(),
        profile_picture_url: Some(url.to_string()),
        message: Some("Profile picture updated successfully".to_string()),
        profile_picture_name: None,
    })
}

pub fn server_error(message: &str) -> Reply {
    Ok(ServerResponse {
        status: "error".to_string(),
        message: Some(message.to_string()),
        ..ServerResponse::default()
    })
}
