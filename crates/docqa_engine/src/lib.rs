//! Docqa engine: backend requests and their execution off the UI thread.
mod backend;
mod engine;
mod types;

pub use backend::{
    Backend, BackendSettings, ReqwestBackend, CHAT_SUMMARY_PATH, CLEAR_HISTORY_PATH,
    CURRENT_MODEL_PATH, QUERY_PATH, STATS_PATH, UPLOAD_PATH,
};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{
    AnswerMetadata, BackendError, ChatSummaryResponse, ClearResponse, CurrentModelResponse,
    DocumentsInfo, DocumentsSection, EngineError, EngineEvent, FileResult, ModelDetails,
    QueryResponse, SourceItem, UploadResponse, VectorstoreSection, WireReply,
};
