use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use docqa_core::{
    ChatSummary, Effect, KnowledgeBaseStats, ModelInfo, Msg, QueryAnswer, Reply, Source,
    UploadOutcome,
};
use docqa_engine::{
    BackendError, BackendSettings, ChatSummaryResponse, CurrentModelResponse, DocumentsInfo,
    EngineError, EngineEvent, EngineHandle, EventSink, QueryResponse, UploadResponse, WireReply,
};
use engine_logging::{engine_info, engine_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: BackendSettings, tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitQuery { message } => {
                    engine_info!("SubmitQuery message_len={}", message.len());
                    self.engine.query(message);
                }
                Effect::UploadFiles { files } => {
                    engine_info!("UploadFiles count={} files={:?}", files.len(), files);
                    self.engine.upload(files);
                }
                Effect::FetchStats => self.engine.fetch_stats(),
                Effect::FetchModel => self.engine.fetch_model(),
                Effect::FetchSummary => self.engine.fetch_summary(),
                Effect::ClearHistory => self.engine.clear_history(),
            }
        }
    }
}

/// Forwards engine events to the app loop as core messages.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::QueryCompleted(result) => {
            Msg::QueryCompleted(to_reply("query", result, map_answer))
        }
        EngineEvent::UploadCompleted(Err(BackendError::ReadFile { path, message })) => {
            Msg::UploadFileUnreadable {
                path: PathBuf::from(path),
                reason: message,
            }
        }
        EngineEvent::UploadCompleted(result) => {
            Msg::UploadCompleted(to_reply("upload", result, map_upload))
        }
        EngineEvent::StatsLoaded(result) => Msg::StatsLoaded(to_reply("stats", result, map_stats)),
        EngineEvent::HistoryCleared(result) => {
            Msg::HistoryCleared(to_reply("clear history", result, |body| body.message))
        }
        EngineEvent::ModelLoaded(result) => Msg::ModelLoaded(to_reply("model", result, map_model)),
        EngineEvent::SummaryLoaded(result) => {
            Msg::SummaryLoaded(to_reply("summary", result, map_summary))
        }
    }
}

fn to_reply<T, U>(
    request: &str,
    result: Result<WireReply<T>, BackendError>,
    convert: impl FnOnce(T) -> U,
) -> Reply<U> {
    match result {
        Ok(WireReply::Success(body)) => Reply::Success(convert(body)),
        Ok(WireReply::Rejected { status, detail }) => {
            engine_warn!("Backend rejected {} request with status {}", request, status);
            Reply::Rejected { detail }
        }
        Err(err) => {
            engine_warn!("{} request failed: {}", request, err);
            Reply::Failed(err.to_string())
        }
    }
}

fn map_answer(body: QueryResponse) -> QueryAnswer {
    QueryAnswer {
        response: body.response,
        sources: body.sources.map(|sources| {
            sources
                .into_iter()
                .map(|source| Source {
                    filename: source.filename,
                    preview: source.preview,
                })
                .collect()
        }),
        confidence: body.confidence,
        documents_found: body.documents_found,
        model: body.metadata.and_then(|metadata| metadata.model),
    }
}

fn map_upload(body: UploadResponse) -> Vec<UploadOutcome> {
    body.results
        .into_iter()
        .map(|result| UploadOutcome::from_wire(result.filename, &result.status, result.message))
        .collect()
}

fn map_stats(info: DocumentsInfo) -> KnowledgeBaseStats {
    KnowledgeBaseStats {
        document_count: info.documents.count,
        total_size_mb: info.documents.total_size_mb,
        chunk_count: info.vectorstore.chunks,
    }
}

/// Falls back to the model key when the backend omits the details.
fn map_model(body: CurrentModelResponse) -> ModelInfo {
    let key = body.model_key.unwrap_or_default();
    let details = body.model_info.unwrap_or_default();
    let model = details.model.unwrap_or_else(|| key.clone());
    ModelInfo {
        name: details.name.unwrap_or_else(|| model.clone()),
        model,
    }
}

fn map_summary(body: ChatSummaryResponse) -> ChatSummary {
    ChatSummary {
        summary: body.summary,
        message_count: body.message_count,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use docqa_core::{ModelInfo, Msg, QueryAnswer, Reply, Source, UploadOutcome, UploadStatus};
    use docqa_engine::{
        AnswerMetadata, BackendError, ClearResponse, CurrentModelResponse, EngineEvent,
        FileResult, ModelDetails, QueryResponse, SourceItem, UploadResponse, WireReply,
    };

    use super::map_event;

    #[test]
    fn query_body_maps_nested_model() {
        let body = QueryResponse {
            response: Some("answer".to_string()),
            sources: Some(vec![SourceItem {
                filename: "geo.pdf".to_string(),
                preview: "Paris...".to_string(),
            }]),
            confidence: Some("high".to_string()),
            documents_found: Some(1),
            metadata: Some(AnswerMetadata {
                model: Some("llama3".to_string()),
            }),
        };

        let msg = map_event(EngineEvent::QueryCompleted(Ok(WireReply::Success(body))));
        assert_eq!(
            msg,
            Msg::QueryCompleted(Reply::Success(QueryAnswer {
                response: Some("answer".to_string()),
                sources: Some(vec![Source {
                    filename: "geo.pdf".to_string(),
                    preview: "Paris...".to_string(),
                }]),
                confidence: Some("high".to_string()),
                documents_found: Some(1),
                model: Some("llama3".to_string()),
            }))
        );
    }

    #[test]
    fn rejection_and_transport_errors_are_distinguished() {
        let rejected = map_event(EngineEvent::QueryCompleted(Ok(WireReply::Rejected {
            status: 500,
            detail: Some("index unavailable".to_string()),
        })));
        assert_eq!(
            rejected,
            Msg::QueryCompleted(Reply::Rejected {
                detail: Some("index unavailable".to_string())
            })
        );

        let failed = map_event(EngineEvent::QueryCompleted(Err(BackendError::Network(
            "connection refused".to_string(),
        ))));
        assert_eq!(
            failed,
            Msg::QueryCompleted(Reply::Failed("connection refused".to_string()))
        );
    }

    #[test]
    fn upload_results_are_classified_in_order() {
        let body = UploadResponse {
            results: vec![
                FileResult {
                    filename: "b.txt".to_string(),
                    status: "error".to_string(),
                    message: "bad format".to_string(),
                },
                FileResult {
                    filename: "a.txt".to_string(),
                    status: "success".to_string(),
                    message: "ok".to_string(),
                },
            ],
        };

        let Msg::UploadCompleted(Reply::Success(outcomes)) =
            map_event(EngineEvent::UploadCompleted(Ok(WireReply::Success(body))))
        else {
            panic!("expected upload success");
        };
        let statuses: Vec<_> = outcomes.iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![UploadStatus::Failure, UploadStatus::Success]);
        assert_eq!(outcomes[1], UploadOutcome::from_wire("a.txt", "success", "ok"));
    }

    #[test]
    fn clear_history_passes_message_through() {
        let msg = map_event(EngineEvent::HistoryCleared(Ok(WireReply::Success(
            ClearResponse {
                message: Some("done".to_string()),
            },
        ))));
        assert_eq!(msg, Msg::HistoryCleared(Reply::Success(Some("done".to_string()))));
    }

    #[test]
    fn unreadable_file_is_not_a_transport_failure() {
        let msg = map_event(EngineEvent::UploadCompleted(Err(BackendError::ReadFile {
            path: "docs/missing.pdf".to_string(),
            message: "No such file or directory".to_string(),
        })));
        assert_eq!(
            msg,
            Msg::UploadFileUnreadable {
                path: PathBuf::from("docs/missing.pdf"),
                reason: "No such file or directory".to_string(),
            }
        );

        let failed = map_event(EngineEvent::UploadCompleted(Err(BackendError::Network(
            "connection reset".to_string(),
        ))));
        assert_eq!(
            failed,
            Msg::UploadCompleted(Reply::Failed("connection reset".to_string()))
        );
    }

    #[test]
    fn model_falls_back_to_key() {
        let full = map_event(EngineEvent::ModelLoaded(Ok(WireReply::Success(
            CurrentModelResponse {
                model_key: Some("tinyllama".to_string()),
                model_info: Some(ModelDetails {
                    model: Some("tinyllama".to_string()),
                    name: Some("TinyLlama 1.1B".to_string()),
                }),
            },
        ))));
        assert_eq!(
            full,
            Msg::ModelLoaded(Reply::Success(ModelInfo {
                name: "TinyLlama 1.1B".to_string(),
                model: "tinyllama".to_string(),
            }))
        );

        let bare = map_event(EngineEvent::ModelLoaded(Ok(WireReply::Success(
            CurrentModelResponse {
                model_key: Some("phi3".to_string()),
                model_info: None,
            },
        ))));
        assert_eq!(
            bare,
            Msg::ModelLoaded(Reply::Success(ModelInfo {
                name: "phi3".to_string(),
                model: "phi3".to_string(),
            }))
        );
    }
}
