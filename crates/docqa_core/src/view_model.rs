use crate::{Author, QueryPhase, UploadPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub query_phase: QueryPhase,
    pub upload_phase: UploadPhase,
    /// Projection of `query_phase`; the guard itself lives in the state.
    pub submit_enabled: bool,
    pub entries: Vec<EntryView>,
    pub info_panel: Option<Vec<String>>,
    /// Entry whose metadata produced `info_panel`. Identical panels from
    /// different answers differ here.
    pub info_panel_entry: Option<usize>,
    /// Index of the newest entry; renderers keep it in view.
    pub scroll_to: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub author: Author,
    pub lines: Vec<String>,
}
