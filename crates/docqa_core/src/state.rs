use std::path::PathBuf;

use crate::metadata::{InfoPanel, ResponseMetadata};
use crate::transcript::{Author, ChatEntry, Transcript};
use crate::view_model::{AppViewModel, EntryView};

/// Query flow guard. Submission is accepted only while `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Submitting,
}

/// Upload flow guard, same contract as [`QueryPhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    query_phase: QueryPhase,
    upload_phase: UploadPhase,
    selected_files: Vec<PathBuf>,
    transcript: Transcript,
    info_panel: Option<InfoPanel>,
    info_panel_entry: Option<usize>,
    scroll_to: Option<usize>,
    startup_requested: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            query_phase: self.query_phase,
            upload_phase: self.upload_phase,
            submit_enabled: self.query_phase == QueryPhase::Idle,
            entries: self
                .transcript
                .entries()
                .iter()
                .map(|entry| EntryView {
                    author: entry.author(),
                    lines: entry.lines(),
                })
                .collect(),
            info_panel: self.info_panel.as_ref().map(InfoPanel::lines),
            info_panel_entry: self.info_panel_entry,
            scroll_to: self.scroll_to,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn info_panel(&self) -> Option<&InfoPanel> {
        self.info_panel.as_ref()
    }

    pub fn query_phase(&self) -> QueryPhase {
        self.query_phase
    }

    pub fn upload_phase(&self) -> UploadPhase {
        self.upload_phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_files(&self) -> &[PathBuf] {
        &self.selected_files
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Builds an entry, appends it and scrolls to it. Assistant entries with
    /// metadata replace the info panel.
    pub fn render(
        &mut self,
        message: impl Into<String>,
        author: Author,
        metadata: Option<ResponseMetadata>,
    ) -> &ChatEntry {
        let entry = ChatEntry::new(author, message, metadata);
        let panel = entry.metadata().map(InfoPanel::from_metadata);
        let index = self.transcript.append(entry);
        if panel.is_some() {
            self.info_panel = panel;
            self.info_panel_entry = Some(index);
        }
        self.scroll_to = Some(index);
        self.mark_dirty();
        &self.transcript.entries()[index]
    }

    pub(crate) fn notice(&mut self, message: impl Into<String>) {
        self.render(message, Author::Assistant, None);
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_input(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.input)
    }

    pub(crate) fn set_query_phase(&mut self, phase: QueryPhase) {
        if self.query_phase != phase {
            self.query_phase = phase;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_upload_phase(&mut self, phase: UploadPhase) {
        if self.upload_phase != phase {
            self.upload_phase = phase;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_files(&mut self, files: Vec<PathBuf>) {
        self.selected_files = files;
        self.mark_dirty();
    }

    pub(crate) fn reset_upload_form(&mut self) {
        self.selected_files.clear();
        self.mark_dirty();
    }

    /// Returns `true` only the first time it is called.
    pub(crate) fn begin_startup_requests(&mut self) -> bool {
        !std::mem::replace(&mut self.startup_requested, true)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
