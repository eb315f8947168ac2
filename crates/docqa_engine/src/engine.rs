use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::engine_debug;

use crate::backend::{Backend, BackendSettings, ReqwestBackend};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Query { message: String },
    Upload { files: Vec<PathBuf> },
    FetchStats,
    FetchModel,
    FetchSummary,
    ClearHistory,
}

/// Receives engine events, one per finished request.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs backend requests on a worker thread; dropping the handle stops it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let backend = Arc::new(ReqwestBackend::new(settings)?);
        Self::with_backend(backend, sink)
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, sink.as_ref()).await;
                });
            }
            engine_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn query(&self, message: impl Into<String>) {
        self.send(EngineCommand::Query {
            message: message.into(),
        });
    }

    pub fn upload(&self, files: Vec<PathBuf>) {
        self.send(EngineCommand::Upload { files });
    }

    pub fn fetch_stats(&self) {
        self.send(EngineCommand::FetchStats);
    }

    pub fn clear_history(&self) {
        self.send(EngineCommand::ClearHistory);
    }

    pub fn fetch_model(&self) {
        self.send(EngineCommand::FetchModel);
    }

    pub fn fetch_summary(&self) {
        self.send(EngineCommand::FetchSummary);
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(backend: &dyn Backend, command: EngineCommand, sink: &dyn EventSink) {
    let event = match command {
        EngineCommand::Query { message } => EngineEvent::QueryCompleted(backend.query(&message).await),
        EngineCommand::Upload { files } => EngineEvent::UploadCompleted(backend.upload(&files).await),
        EngineCommand::FetchStats => EngineEvent::StatsLoaded(backend.stats().await),
        EngineCommand::ClearHistory => EngineEvent::HistoryCleared(backend.clear_history().await),
        EngineCommand::FetchModel => EngineEvent::ModelLoaded(backend.current_model().await),
        EngineCommand::FetchSummary => EngineEvent::SummaryLoaded(backend.chat_summary().await),
    };
    sink.emit(event);
}
