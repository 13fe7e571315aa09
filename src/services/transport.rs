use crate::config::UploaderConfig;
use crate::error::UploadError;
use crate::models::{ServerResponse, UploadRequest};
use reqwest::header::{COOKIE, REFERER};
use reqwest::multipart::{Form, Part};
use url::Url;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "profile_picture";

/// Form field (and page field) carrying the anti-forgery token
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Trait for upload transport implementations
#[async_trait::async_trait]
pub trait UploadTransport: Send + Sync {
    /// POST the request and decode the JSON body.
    /// A non-2xx status is an error regardless of the body.
    async fn send(&self, request: UploadRequest) -> Result<ServerResponse, UploadError>;
}

/// reqwest-backed transport posting to the profile page URL
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    session_id: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &UploaderConfig) -> Result<Self, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            session_id: config.session_id.clone(),
        })
    }

    fn cookie_header(&self, csrf_token: &str) -> String {
        match &self.session_id {
            Some(session_id) => format!("csrftoken={}; sessionid={}", csrf_token, session_id),
            None => format!("csrftoken={}", csrf_token),
        }
    }

    fn build_form(request: &UploadRequest) -> Result<Form, UploadError> {
        let file = &request.file;
        let part = Part::stream_with_length(file.bytes.clone(), file.size())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;

        Ok(Form::new()
            .part(FILE_FIELD, part)
            .text(CSRF_FIELD, request.csrf_token.clone()))
    }
}

#[async_trait::async_trait]
impl UploadTransport for HttpTransport {
    async fn send(&self, request: UploadRequest) -> Result<ServerResponse, UploadError> {
        let form = Self::build_form(&request)?;

        tracing::debug!(
            "POST {} ({}, {} bytes)",
            self.endpoint,
            request.file.name,
            request.file.size()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .header(CSRF_HEADER, &request.csrf_token)
            .header(REFERER, self.endpoint.as_str())
            .header(COOKIE, self.cookie_header(&request.csrf_token))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Profile picture upload returned {}", status);
            return Err(UploadError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<ServerResponse>(&body).map_err(|e| {
            tracing::error!("Could not decode upload response: {}", e);
            UploadError::Decode(e.to_string())
        })
    }
}
