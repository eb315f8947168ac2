//! Docqa core: pure state machine, transcript rendering and upload aggregation.
mod effect;
mod metadata;
mod msg;
mod reply;
mod state;
mod transcript;
mod update;
mod upload;
mod view_model;

pub use effect::Effect;
pub use metadata::{
    Confidence, InfoItem, InfoPanel, QueryAnswer, ResponseMetadata, Source, DEFAULT_RESPONSE_TEXT,
};
pub use msg::Msg;
pub use reply::{ChatSummary, KnowledgeBaseStats, ModelInfo, Reply};
pub use state::{AppState, QueryPhase, UploadPhase};
pub use transcript::{Author, ChatEntry, Transcript, ASSISTANT_LABEL, SOURCES_HEADER, USER_LABEL};
pub use update::update;
pub use upload::{
    is_empty_selection, UploadOutcome, UploadStatus, UploadSummary, UPLOAD_RESULTS_HEADER,
};
pub use view_model::{AppViewModel, EntryView};
