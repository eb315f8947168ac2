use std::path::PathBuf;

use crate::{ChatSummary, KnowledgeBaseStats, ModelInfo, QueryAnswer, Reply, UploadOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session initialized; triggers the one-off statistics and model fetches.
    Started,
    /// User edited the query input.
    InputChanged(String),
    /// User submitted the current query input.
    QuerySubmitted,
    /// Backend finished the outstanding query.
    QueryCompleted(Reply<QueryAnswer>),
    /// User replaced the upload file selection.
    FilesSelected(Vec<PathBuf>),
    /// User submitted the current file selection.
    UploadSubmitted,
    /// Backend finished the outstanding upload.
    UploadCompleted(Reply<Vec<UploadOutcome>>),
    /// A selected file could not be read, so nothing was sent.
    UploadFileUnreadable { path: PathBuf, reason: String },
    /// Knowledge-base statistics arrived (or failed).
    StatsLoaded(Reply<KnowledgeBaseStats>),
    /// Active model arrived (or failed).
    ModelLoaded(Reply<ModelInfo>),
    /// User asked the backend to forget the conversation.
    ClearHistoryRequested,
    /// Backend answered the clear-history request with its confirmation.
    HistoryCleared(Reply<Option<String>>),
    SummaryRequested,
    SummaryLoaded(Reply<ChatSummary>),
    /// A local notice to show as an assistant entry (help text, unknown commands).
    Notice(String),
}
