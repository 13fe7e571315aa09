use crate::utils::validation::MAX_FILE_SIZE;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/accounts/profile/";

/// What happens when a file is chosen while an upload is still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Ignore the new selection until the current upload settles
    #[default]
    Reject,
    /// Start the new upload; the older response is discarded on arrival
    LatestWins,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(OverlapPolicy::Reject),
            "latest" | "latest-wins" | "latest_wins" => Ok(OverlapPolicy::LatestWins),
            other => Err(format!("unknown overlap policy '{}'", other)),
        }
    }
}

/// Client configuration for profile picture uploads
#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Profile page URL the form posts back to
    pub endpoint: Url,

    /// Value of the page's csrfmiddlewaretoken field
    pub csrf_token: Option<String>,

    /// Django session cookie, when uploading outside a browser
    pub session_id: Option<String>,

    /// Maximum file size in bytes (default: 10 MB)
    pub max_file_size: u64,

    /// How long toasts stay visible (default: 3s)
    pub toast_duration: Duration,

    pub overlap_policy: OverlapPolicy,

    /// Request timeout; none by default, a hung request keeps the spinner up
    pub request_timeout: Option<Duration>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            csrf_token: None,
            session_id: None,
            max_file_size: MAX_FILE_SIZE,
            toast_duration: Duration::from_secs(3),
            overlap_policy: OverlapPolicy::Reject,
            request_timeout: None,
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

impl UploaderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            endpoint: env::var("UPLOAD_ENDPOINT")
                .ok()
                .and_then(|v| match Url::parse(&v) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!("Ignoring invalid UPLOAD_ENDPOINT '{}': {}", v, e);
                        None
                    }
                })
                .unwrap_or(default.endpoint),

            csrf_token: env::var("CSRF_TOKEN").ok().filter(|v| !v.is_empty()),

            session_id: env::var("SESSION_ID").ok().filter(|v| !v.is_empty()),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            toast_duration: env::var("TOAST_DURATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.toast_duration),

            overlap_policy: env::var("OVERLAP_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.overlap_policy),

            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Create config for a local Django dev server
    pub fn development() -> Self {
        Self {
            csrf_token: Some("development-csrf-token".to_string()),
            request_timeout: Some(Duration::from_secs(30)),
            ..Self::default()
        }
    }
}
