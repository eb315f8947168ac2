use std::path::PathBuf;

/// IO requested by `update`; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitQuery { message: String },
    UploadFiles { files: Vec<PathBuf> },
    FetchStats,
    FetchModel,
    FetchSummary,
    ClearHistory,
}
