use std::path::{Path, PathBuf};

pub const UPLOAD_RESULTS_HEADER: &str = "Upload results:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Success,
    Failure,
}

impl UploadStatus {
    /// Only the exact value `"success"` counts as success.
    pub fn from_wire(raw: &str) -> Self {
        if raw == "success" {
            UploadStatus::Success
        } else {
            UploadStatus::Failure
        }
    }
}

/// Per-file result reported by the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub filename: String,
    pub status: UploadStatus,
    pub message: String,
}

impl UploadOutcome {
    pub fn from_wire(filename: impl Into<String>, status: &str, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: UploadStatus::from_wire(status),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadSummary {
    pub success_count: usize,
    pub failure_count: usize,
    pub lines: Vec<String>,
}

impl UploadSummary {
    /// Tallies outcomes in the order received. Lines are never regrouped by status.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = UploadOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            let mark = match outcome.status {
                UploadStatus::Success => {
                    summary.success_count += 1;
                    '✓'
                }
                UploadStatus::Failure => {
                    summary.failure_count += 1;
                    '✗'
                }
            };
            summary
                .lines
                .push(format!("{mark} {}: {}", outcome.filename, outcome.message));
        }
        summary
    }

    pub fn totals_line(&self) -> String {
        format!(
            "{} succeeded, {} failed",
            self.success_count, self.failure_count
        )
    }

    /// Single message body: header, one line per file, blank line, totals.
    pub fn to_message(&self) -> String {
        let mut message = String::from(UPLOAD_RESULTS_HEADER);
        for line in &self.lines {
            message.push('\n');
            message.push_str(line);
        }
        message.push_str("\n\n");
        message.push_str(&self.totals_line());
        message
    }
}

/// A selection is empty when nothing is picked or the only slot has no file name.
pub fn is_empty_selection(files: &[PathBuf]) -> bool {
    match files {
        [] => true,
        [only] => display_name(only).is_none(),
        _ => false,
    }
}

fn display_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{is_empty_selection, UploadOutcome, UploadStatus, UploadSummary};

    #[test]
    fn only_exact_success_counts() {
        assert_eq!(UploadStatus::from_wire("success"), UploadStatus::Success);
        assert_eq!(UploadStatus::from_wire("Success"), UploadStatus::Failure);
        assert_eq!(UploadStatus::from_wire("error"), UploadStatus::Failure);
        assert_eq!(UploadStatus::from_wire(""), UploadStatus::Failure);
    }

    #[test]
    fn counts_add_up_and_order_is_preserved() {
        let outcomes = vec![
            UploadOutcome::from_wire("1.txt", "error", "bad"),
            UploadOutcome::from_wire("2.txt", "success", "ok"),
            UploadOutcome::from_wire("3.txt", "error", "bad"),
            UploadOutcome::from_wire("4.txt", "success", "ok"),
        ];
        let len = outcomes.len();
        let summary = UploadSummary::from_outcomes(outcomes);

        assert_eq!(summary.success_count + summary.failure_count, len);
        assert_eq!(
            summary.lines,
            vec!["✗ 1.txt: bad", "✓ 2.txt: ok", "✗ 3.txt: bad", "✓ 4.txt: ok"]
        );
    }

    #[test]
    fn empty_result_list_still_reports_totals() {
        let summary = UploadSummary::from_outcomes(Vec::new());
        assert_eq!(summary.to_message(), "Upload results:\n\n0 succeeded, 0 failed");
    }

    #[test]
    fn empty_selection_detection() {
        assert!(is_empty_selection(&[]));
        assert!(is_empty_selection(&[PathBuf::new()]));
        assert!(is_empty_selection(&[PathBuf::from("/")]));
        assert!(!is_empty_selection(&[PathBuf::from("notes.txt")]));
        assert!(!is_empty_selection(&[PathBuf::new(), PathBuf::new()]));
    }
}
