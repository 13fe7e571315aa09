use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use profile_picture_uploader::utils::validation::format_megabytes;
use profile_picture_uploader::{
    PathPicker, TerminalView, UploadOutcome, UploaderConfig, create_widget,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Profile page URL the picture is posted to (overrides UPLOAD_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<Url>,

    /// Value of the page's csrfmiddlewaretoken field
    #[arg(long)]
    csrf_token: Option<String>,

    /// Django session id of the logged-in user
    #[arg(long)]
    session_id: Option<String>,

    /// Give up after this many seconds (default: wait forever)
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Upload an image file from disk
    Choose {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Capture a photo with the camera and upload it
    TakePhoto,
}

/// Process exit status for an upload: 0 only when the picture was updated
fn exit_status(outcome: &UploadOutcome) -> u8 {
    if outcome.is_success() { 0 } else { 1 }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_picture_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = UploaderConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if args.csrf_token.is_some() {
        config.csrf_token = args.csrf_token;
    }
    if args.session_id.is_some() {
        config.session_id = args.session_id;
    }
    if let Some(secs) = args.timeout {
        config.request_timeout = Some(Duration::from_secs(secs));
    }

    info!(
        "🚀 Profile picture upload to {} (max {}MB)",
        config.endpoint,
        format_megabytes(config.max_file_size)
    );

    let view = Arc::new(TerminalView::new(config.csrf_token.clone()));
    let file = match &args.action {
        Action::Choose { file } => Some(file.clone()),
        Action::TakePhoto => None,
    };
    let picker = Arc::new(PathPicker::new(file));
    let widget = create_widget(&config, view.clone(), picker)?;

    let outcome = match args.action {
        Action::Choose { .. } => widget.choose_file().await,
        Action::TakePhoto => widget.take_photo().await,
    };

    match &outcome {
        UploadOutcome::Succeeded { stored_name, .. } => {
            if let Some(name) = stored_name {
                info!("💾 Stored as {}", name);
            }
            if let Some(src) = view.image_source() {
                info!("🔗 {}", src);
            }
        }
        UploadOutcome::NoFile => error!("No file selected"),
        other => error!("Upload did not complete: {:?}", other),
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}
