/// Outcome of one backend call as seen by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// 2xx response with a parsed body.
    Success(T),
    /// Non-2xx response; `detail` comes from the error body when present.
    Rejected { detail: Option<String> },
    /// Network failure or unreadable body.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBaseStats {
    pub document_count: u64,
    pub total_size_mb: f64,
    pub chunk_count: u64,
}

/// Language model the backend answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub name: String,
    pub model: String,
}

impl ModelInfo {
    /// `"TinyLlama 1.1B (tinyllama)"`, or just the name when both coincide.
    pub fn label(&self) -> String {
        if self.name == self.model || self.model.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.model)
        }
    }
}

/// Server-side view of the running conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub summary: String,
    pub message_count: u64,
}
