use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{
    AppState, Author, ChatSummary, Effect, KnowledgeBaseStats, ModelInfo, Msg, QueryAnswer,
    QueryPhase, Reply, UploadOutcome, UploadPhase, UploadSummary,
};

const UNKNOWN_ERROR: &str = "unknown error";
const EMPTY_SELECTION_NOTICE: &str = "Please select at least one file.";
const HISTORY_CLEARED: &str = "Conversation history cleared.";
const QUERY_BUSY_NOTICE: &str = "Still processing the previous question; not sent.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.begin_startup_requests() {
                vec![Effect::FetchStats, Effect::FetchModel]
            } else {
                Vec::new()
            }
        }
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::QuerySubmitted => submit_query(&mut state),
        Msg::QueryCompleted(reply) => {
            // Re-enable submission before looking at the reply.
            state.set_query_phase(QueryPhase::Idle);
            render_query_reply(&mut state, reply);
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            if state.upload_phase() == UploadPhase::Uploading {
                engine_debug!("File selection ignored while an upload is in flight");
            } else {
                state.select_files(files);
            }
            Vec::new()
        }
        Msg::UploadSubmitted => submit_upload(&mut state),
        Msg::UploadCompleted(reply) => {
            state.set_upload_phase(UploadPhase::Idle);
            render_upload_reply(&mut state, reply);
            Vec::new()
        }
        Msg::UploadFileUnreadable { path, reason } => {
            state.set_upload_phase(UploadPhase::Idle);
            engine_warn!("Upload aborted, {:?} is unreadable: {}", path, reason);
            state.notice(format!("Could not read {}: {reason}", path.display()));
            Vec::new()
        }
        Msg::StatsLoaded(reply) => {
            announce_stats(&mut state, reply);
            Vec::new()
        }
        Msg::ModelLoaded(reply) => {
            announce_model(&mut state, reply);
            Vec::new()
        }
        Msg::ClearHistoryRequested => {
            if state.query_phase() == QueryPhase::Idle {
                vec![Effect::ClearHistory]
            } else {
                engine_debug!("Clear history ignored while a query is in flight");
                Vec::new()
            }
        }
        Msg::HistoryCleared(reply) => {
            let text = match reply {
                Reply::Success(message) => message.unwrap_or_else(|| HISTORY_CLEARED.to_string()),
                Reply::Rejected { detail } => error_text(detail),
                Reply::Failed(description) => format!("Connection error: {description}"),
            };
            state.notice(text);
            Vec::new()
        }
        Msg::SummaryRequested => vec![Effect::FetchSummary],
        Msg::SummaryLoaded(reply) => {
            let text = match reply {
                Reply::Success(summary) => summary_text(&summary),
                Reply::Rejected { detail } => error_text(detail),
                Reply::Failed(description) => format!("Connection error: {description}"),
            };
            state.notice(text);
            Vec::new()
        }
        Msg::Notice(text) => {
            state.notice(text);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit_query(state: &mut AppState) -> Vec<Effect> {
    if state.input().trim().is_empty() {
        return Vec::new();
    }
    if state.query_phase() == QueryPhase::Submitting {
        engine_debug!("Query submit ignored while another query is in flight");
        state.notice(QUERY_BUSY_NOTICE);
        return Vec::new();
    }

    let message = state.take_input().trim().to_string();
    state.set_query_phase(QueryPhase::Submitting);
    state.render(message.clone(), Author::User, None);
    engine_info!("Submitting query len={}", message.len());
    vec![Effect::SubmitQuery { message }]
}

fn render_query_reply(state: &mut AppState, reply: Reply<QueryAnswer>) {
    match reply {
        Reply::Success(answer) => {
            let (text, metadata) = answer.normalize();
            state.render(text, Author::Assistant, Some(metadata));
        }
        Reply::Rejected { detail } => state.notice(error_text(detail)),
        Reply::Failed(description) => {
            engine_warn!("Query failed: {}", description);
            state.notice(format!("Connection error: {description}"));
        }
    }
}

fn submit_upload(state: &mut AppState) -> Vec<Effect> {
    if state.upload_phase() == UploadPhase::Uploading {
        engine_debug!("Upload submit ignored while another upload is in flight");
        return Vec::new();
    }
    if crate::is_empty_selection(state.selected_files()) {
        state.notice(EMPTY_SELECTION_NOTICE);
        return Vec::new();
    }

    let files = state.selected_files().to_vec();
    state.set_upload_phase(UploadPhase::Uploading);
    state.notice(format!("Uploading {} file(s)...", files.len()));
    engine_info!("Uploading {} file(s)", files.len());
    vec![Effect::UploadFiles { files }]
}

fn render_upload_reply(state: &mut AppState, reply: Reply<Vec<UploadOutcome>>) {
    match reply {
        Reply::Success(outcomes) => {
            let summary = UploadSummary::from_outcomes(outcomes);
            engine_info!(
                "Upload finished: {} succeeded, {} failed",
                summary.success_count,
                summary.failure_count
            );
            state.notice(summary.to_message());
            state.reset_upload_form();
        }
        Reply::Rejected { detail } => {
            let detail = detail.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            state.notice(format!("Error uploading files: {detail}"));
        }
        Reply::Failed(description) => {
            engine_warn!("Upload failed: {}", description);
            state.notice(format!("Connection error while uploading files: {description}"));
        }
    }
}

fn announce_stats(state: &mut AppState, reply: Reply<KnowledgeBaseStats>) {
    match reply {
        Reply::Success(stats) if stats.document_count > 0 => {
            state.notice(format!(
                "Knowledge base loaded: {} documents ({} MB) with {} indexed chunks.",
                stats.document_count, stats.total_size_mb, stats.chunk_count
            ));
        }
        Reply::Success(_) => {
            engine_debug!("Knowledge base is empty; no startup notice");
        }
        Reply::Rejected { detail } => {
            engine_warn!(
                "Could not load knowledge base statistics: {}",
                detail.as_deref().unwrap_or(UNKNOWN_ERROR)
            );
        }
        Reply::Failed(description) => {
            engine_warn!("Could not load knowledge base statistics: {}", description);
        }
    }
}

/// Same silent-failure rule as the statistics notice.
fn announce_model(state: &mut AppState, reply: Reply<ModelInfo>) {
    match reply {
        Reply::Success(model) if !model.name.is_empty() => {
            state.notice(format!("Active model: {}", model.label()));
        }
        Reply::Success(_) => engine_debug!("Backend reported no model name"),
        Reply::Rejected { detail } => {
            engine_warn!(
                "Could not load the active model: {}",
                detail.as_deref().unwrap_or(UNKNOWN_ERROR)
            );
        }
        Reply::Failed(description) => {
            engine_warn!("Could not load the active model: {}", description);
        }
    }
}

fn summary_text(summary: &ChatSummary) -> String {
    format!(
        "Conversation summary: {} ({} messages)",
        summary.summary, summary.message_count
    )
}

fn error_text(detail: Option<String>) -> String {
    format!("Error: {}", detail.as_deref().unwrap_or(UNKNOWN_ERROR))
}
