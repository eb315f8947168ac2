use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_debug, engine_trace, engine_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::types::ErrorBody;
use crate::{
    BackendError, ChatSummaryResponse, ClearResponse, CurrentModelResponse, DocumentsInfo,
    EngineError, QueryResponse, UploadResponse, WireReply,
};

pub const QUERY_PATH: &str = "/chat";
pub const UPLOAD_PATH: &str = "/upload";
pub const STATS_PATH: &str = "/api/documents";
pub const CLEAR_HISTORY_PATH: &str = "/chat/clear";
pub const CURRENT_MODEL_PATH: &str = "/api/model/current";
pub const CHAT_SUMMARY_PATH: &str = "/api/chat/summary";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` lets a slow answer run for as long as the backend needs.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn query(&self, message: &str) -> Result<WireReply<QueryResponse>, BackendError>;

    async fn upload(&self, files: &[PathBuf]) -> Result<WireReply<UploadResponse>, BackendError>;

    async fn stats(&self) -> Result<WireReply<DocumentsInfo>, BackendError>;

    async fn clear_history(&self) -> Result<WireReply<ClearResponse>, BackendError>;

    async fn current_model(&self) -> Result<WireReply<CurrentModelResponse>, BackendError>;

    async fn chat_summary(&self) -> Result<WireReply<ChatSummaryResponse>, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, EngineError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| EngineError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::InvalidUrl(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<WireReply<T>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn query(&self, message: &str) -> Result<WireReply<QueryResponse>, BackendError> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("message", message)
            .finish();
        let response = self
            .client
            .post(self.endpoint(QUERY_PATH)?)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }

    async fn upload(&self, files: &[PathBuf]) -> Result<WireReply<UploadResponse>, BackendError> {
        let mut form = Form::new();
        for path in files {
            form = form.part("files", file_part(path).await?);
        }
        engine_debug!("Sending {} file part(s) to {}", files.len(), UPLOAD_PATH);

        let response = self
            .client
            .post(self.endpoint(UPLOAD_PATH)?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }

    async fn stats(&self) -> Result<WireReply<DocumentsInfo>, BackendError> {
        self.get(STATS_PATH).await
    }

    async fn clear_history(&self) -> Result<WireReply<ClearResponse>, BackendError> {
        let response = self
            .client
            .post(self.endpoint(CLEAR_HISTORY_PATH)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }

    async fn current_model(&self) -> Result<WireReply<CurrentModelResponse>, BackendError> {
        self.get(CURRENT_MODEL_PATH).await
    }

    async fn chat_summary(&self) -> Result<WireReply<ChatSummaryResponse>, BackendError> {
        self.get(CHAT_SUMMARY_PATH).await
    }
}

async fn file_part(path: &Path) -> Result<Part, BackendError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| BackendError::ReadFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Part::bytes(bytes).file_name(filename))
}

/// Both success and error bodies must be JSON; anything else is a decode failure.
async fn read_reply<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<WireReply<T>, BackendError> {
    let status = response.status();
    let url = response.url().clone();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    engine_trace!("{} from {} ({} bytes)", status, url, bytes.len());

    if status.is_success() {
        return serde_json::from_slice(&bytes)
            .map(WireReply::Success)
            .map_err(|err| BackendError::Decode(err.to_string()));
    }

    let body: ErrorBody = serde_json::from_slice(&bytes).map_err(|err| {
        engine_warn!("Unreadable error body for status {}: {}", status, err);
        BackendError::Decode(err.to_string())
    })?;
    Ok(WireReply::Rejected {
        status: status.as_u16(),
        detail: body.into_detail(),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return BackendError::Decode(err.to_string());
    }
    BackendError::Network(err.to_string())
}
