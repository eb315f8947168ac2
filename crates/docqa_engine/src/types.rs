use serde::Deserialize;

/// Body of a successful `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct QueryResponse {
    pub response: Option<String>,
    pub sources: Option<Vec<SourceItem>>,
    pub confidence: Option<String>,
    pub documents_found: Option<u64>,
    pub metadata: Option<AnswerMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SourceItem {
    #[serde(default)]
    pub filename: String,
    /// Older backends send the snippet as `content`.
    #[serde(default, alias = "content")]
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AnswerMetadata {
    pub model: Option<String>,
}

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub results: Vec<FileResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FileResult {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /api/documents`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocumentsInfo {
    pub documents: DocumentsSection,
    #[serde(default)]
    pub vectorstore: VectorstoreSection,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocumentsSection {
    pub count: u64,
    #[serde(default)]
    pub total_size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct VectorstoreSection {
    #[serde(default)]
    pub chunks: u64,
}

/// Body of `POST /chat/clear`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ClearResponse {
    pub message: Option<String>,
}

/// Body of `GET /api/model/current`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CurrentModelResponse {
    pub model_key: Option<String>,
    pub model_info: Option<ModelDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ModelDetails {
    /// Ollama tag, e.g. `tinyllama`.
    pub model: Option<String>,
    /// Display name, e.g. `TinyLlama 1.1B`.
    pub name: Option<String>,
}

/// Body of `GET /api/chat/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChatSummaryResponse {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub message_count: u64,
}

/// Error body of any non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Strings are kept verbatim; structured details (validation errors) as JSON text.
    pub(crate) fn into_detail(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

/// Outcome of a request that reached the backend and returned a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum WireReply<T> {
    Success(T),
    Rejected { status: u16, detail: Option<String> },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not read {path}: {message}")]
    ReadFile { path: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("failed to build http client: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    QueryCompleted(Result<WireReply<QueryResponse>, BackendError>),
    UploadCompleted(Result<WireReply<UploadResponse>, BackendError>),
    StatsLoaded(Result<WireReply<DocumentsInfo>, BackendError>),
    HistoryCleared(Result<WireReply<ClearResponse>, BackendError>),
    ModelLoaded(Result<WireReply<CurrentModelResponse>, BackendError>),
    SummaryLoaded(Result<WireReply<ChatSummaryResponse>, BackendError>),
}
