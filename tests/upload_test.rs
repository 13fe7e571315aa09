mod common;

use bytes::Bytes;
use common::*;
use profile_picture_uploader::{
    CaptureMode, MemoryView, SelectedFile, ToastKind, UploadError, UploadOutcome, UploaderConfig,
};
use std::time::Duration;

fn assert_restored(h: &Harness) {
    assert_eq!(h.view.image_opacity(), Some(1.0));
    assert_eq!(h.view.spinner_visible(), Some(false));
}

#[tokio::test]
async fn test_oversized_file_is_rejected_without_request() {
    let h = profile_page();
    let file = SelectedFile::new(
        "huge.png",
        "image/png",
        Bytes::from(vec![0u8; 10 * 1024 * 1024 + 1]),
    );

    let outcome = h.widget.on_file_selected(Some(file)).await;

    assert!(matches!(outcome, UploadOutcome::Rejected(UploadError::Validation(_))));
    assert!(h.transport.requests().is_empty());

    let toasts = h.view.toast_history();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "File size too large. Maximum size is 10MB.");

    // Never entered the loading state
    assert!(h.view.snapshot().opacity_history.is_empty());
    assert_eq!(h.view.image_source().as_deref(), Some(DEFAULT_IMAGE));
}

#[tokio::test]
async fn test_exactly_ten_megabytes_is_accepted() {
    let h = profile_page();
    h.transport.respond(success("/media/x.png"));
    let file = SelectedFile::new(
        "big.png",
        "image/png",
        Bytes::from(vec![0u8; 10 * 1024 * 1024]),
    );

    let outcome = h.widget.on_file_selected(Some(file)).await;
    assert!(outcome.is_success());
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn test_non_image_is_rejected_without_request() {
    let h = profile_page();
    let file = SelectedFile::new("cv.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.5"));

    let outcome = h.widget.on_file_selected(Some(file)).await;

    assert!(matches!(outcome, UploadOutcome::Rejected(_)));
    assert!(h.transport.requests().is_empty());
    assert_eq!(h.view.toast_history()[0].message, "Please select an image file.");
}

#[tokio::test]
async fn test_no_file_is_a_no_op() {
    let h = profile_page();

    let outcome = h.widget.on_file_selected(None).await;

    assert!(matches!(outcome, UploadOutcome::NoFile));
    assert!(h.view.toast_history().is_empty());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_successful_upload_updates_image() {
    let h = profile_page();
    h.transport.respond(success("/media/x.png"));

    let outcome = h.widget.on_file_selected(Some(png("me.png"))).await;

    assert!(matches!(
        outcome,
        UploadOutcome::Succeeded { image_url: Some(ref url), .. } if url == "/media/x.png"
    ));

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].csrf_token, TOKEN);
    assert_eq!(requests[0].file.name, "me.png");

    assert_eq!(
        h.view.image_source().as_deref(),
        Some("/media/x.png?t=1700000000000")
    );
    assert_eq!(h.view.snapshot().opacity_history, vec![0.5, 1.0]);
    assert_restored(&h);

    let toasts = h.view.visible_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].message, "Profile picture updated successfully");

    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert!(h.view.visible_toasts().is_empty());
}

#[tokio::test]
async fn test_success_without_url_keeps_image() {
    let h = profile_page();
    h.transport.respond(Ok(profile_picture_uploader::ServerResponse {
        status: "success".to_string(),
        ..Default::default()
    }));

    let outcome = h.widget.on_file_selected(Some(png("me.png"))).await;

    assert!(matches!(outcome, UploadOutcome::Succeeded { image_url: None, .. }));
    assert_eq!(h.view.image_source().as_deref(), Some(DEFAULT_IMAGE));
    assert_eq!(h.view.toast_history()[0].kind, ToastKind::Success);
}

#[tokio::test]
async fn test_success_carries_stored_name() {
    let h = profile_page();
    h.transport.respond(Ok(profile_picture_uploader::ServerResponse {
        status: "success".to_string(),
        profile_picture_url: Some("/media/profile_pics/user_1.png".to_string()),
        profile_picture_name: Some("profile_pics/user_1.png".to_string()),
        ..Default::default()
    }));

    let outcome = h.widget.on_file_selected(Some(png("me.png"))).await;

    assert!(matches!(
        outcome,
        UploadOutcome::Succeeded { stored_name: Some(ref name), .. } if name == "profile_pics/user_1.png"
    ));
}

#[tokio::test]
async fn test_application_error_shows_server_message() {
    let h = profile_page();
    h.transport.respond(server_error("bad image"));

    let outcome = h.widget.on_file_selected(Some(png("me.png"))).await;

    assert!(matches!(outcome, UploadOutcome::Failed(UploadError::Application(_))));
    let toasts = h.view.toast_history();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "bad image");
    assert_eq!(h.view.image_source().as_deref(), Some(DEFAULT_IMAGE));
    assert_restored(&h);
}

#[tokio::test]
async fn test_non_2xx_shows_network_message() {
    let h = profile_page();
    h.transport.respond(Err(UploadError::HttpStatus(502)));

    h.widget.on_file_selected(Some(png("me.png"))).await;

    assert_eq!(h.view.toast_history()[0].message, "Network response was not ok");
    assert_restored(&h);
}

#[tokio::test]
async fn test_transport_failure_restores_visual_state() {
    let h = profile_page();
    h.transport
        .respond(Err(UploadError::Transport("connection refused".to_string())));
    h.transport.respond(Err(UploadError::Decode(String::new())));

    h.widget.on_file_selected(Some(png("a.png"))).await;
    assert_restored(&h);
    h.widget.on_file_selected(Some(png("b.png"))).await;
    assert_restored(&h);

    let messages: Vec<_> = h
        .view
        .toast_history()
        .into_iter()
        .map(|t| t.message)
        .collect();
    assert_eq!(
        messages,
        vec!["connection refused", "Error updating profile picture"]
    );
}

#[tokio::test]
async fn test_missing_csrf_token_is_configuration_error() {
    let h = harness(
        UploaderConfig::default(),
        MemoryView::new().with_image(DEFAULT_IMAGE).with_spinner(),
        false,
    );

    let outcome = h.widget.on_file_selected(Some(png("me.png"))).await;

    assert!(matches!(
        outcome,
        UploadOutcome::Rejected(UploadError::MissingCsrfToken)
    ));
    assert!(h.transport.requests().is_empty());
    assert_eq!(h.view.toast_history()[0].kind, ToastKind::Error);
}

#[tokio::test]
async fn test_page_without_image_or_spinner_still_uploads() {
    let h = harness(
        UploaderConfig::default(),
        MemoryView::new().with_csrf_token(TOKEN),
        false,
    );
    h.transport.respond(success("/media/x.png"));

    let outcome = h.widget.on_file_selected(Some(png("me.png"))).await;

    assert!(outcome.is_success());
    assert!(h.view.image_source().is_none());
    assert!(h.view.spinner_visible().is_none());
}

#[tokio::test]
async fn test_take_photo_without_camera() {
    let h = profile_page();
    h.picker.push(png("selfie.png"));

    let outcome = h.widget.take_photo().await;

    assert!(matches!(
        outcome,
        UploadOutcome::Rejected(UploadError::CameraUnsupported)
    ));
    assert!(h.picker.opened().is_empty());
    assert_eq!(
        h.view.toast_history()[0].message,
        "Camera access is not supported on this device or browser."
    );
}

#[tokio::test]
async fn test_take_photo_with_camera() {
    let h = harness(
        UploaderConfig::default(),
        MemoryView::profile_page(DEFAULT_IMAGE, TOKEN),
        true,
    );
    h.picker.push(png("selfie.png"));
    h.transport.respond(success("/media/selfie.png"));

    let outcome = h.widget.take_photo().await;

    assert!(outcome.is_success());
    assert_eq!(h.picker.opened(), vec![Some(CaptureMode::User)]);
}

#[tokio::test]
async fn test_choose_file_clears_capture_intent() {
    let h = profile_page();
    h.picker.push(png("me.png"));
    h.transport.respond(success("/media/me.png"));

    let outcome = h.widget.choose_file().await;

    assert!(outcome.is_success());
    assert_eq!(h.picker.opened(), vec![None]);
}

#[tokio::test]
async fn test_choose_file_cancelled() {
    let h = profile_page();

    let outcome = h.widget.choose_file().await;

    assert!(matches!(outcome, UploadOutcome::NoFile));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_widget_usable_after_failure() {
    let h = profile_page();
    h.transport.respond(server_error("bad image"));
    h.transport.respond(success("/media/ok.png"));

    assert!(!h.widget.on_file_selected(Some(png("a.png"))).await.is_success());
    assert!(h.widget.on_file_selected(Some(png("b.png"))).await.is_success());
    assert_eq!(h.transport.requests().len(), 2);
}
