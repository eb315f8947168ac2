use std::fmt;

pub const DEFAULT_RESPONSE_TEXT: &str = "Response received.";

/// A document the backend consulted while answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub filename: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
    Error,
    Unknown,
    /// Any value the backend sends that has no badge.
    Other(String),
}

impl Confidence {
    /// Exact, case-sensitive match on the wire value.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            "low" => Confidence::Low,
            "error" => Confidence::Error,
            "unknown" => Confidence::Unknown,
            other => Confidence::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Error => "error",
            Confidence::Unknown => "unknown",
            Confidence::Other(raw) => raw,
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Confidence::High => Some("🟢"),
            Confidence::Medium => Some("🟡"),
            Confidence::Low => Some("🔴"),
            Confidence::Error => Some("❌"),
            Confidence::Unknown | Confidence::Other(_) => None,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance attached to an assistant entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseMetadata {
    pub sources: Vec<Source>,
    pub confidence: Option<Confidence>,
    pub documents_found: Option<u64>,
    pub model: Option<String>,
}

/// Query answer as received, every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryAnswer {
    pub response: Option<String>,
    pub sources: Option<Vec<Source>>,
    pub confidence: Option<String>,
    pub documents_found: Option<u64>,
    pub model: Option<String>,
}

impl QueryAnswer {
    /// Fills every optional field with its default so rendering never has to.
    ///
    /// Empty strings count as absent for the response text, the confidence
    /// and the model name.
    pub fn normalize(self) -> (String, ResponseMetadata) {
        let text = non_empty(self.response).unwrap_or_else(|| DEFAULT_RESPONSE_TEXT.to_string());
        let confidence = non_empty(self.confidence)
            .map(|raw| Confidence::from_wire(&raw))
            .unwrap_or(Confidence::Unknown);
        let metadata = ResponseMetadata {
            sources: self.sources.unwrap_or_default(),
            confidence: Some(confidence),
            documents_found: Some(self.documents_found.unwrap_or(0)),
            model: non_empty(self.model),
        };
        (text, metadata)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoItem {
    Documents(u64),
    Confidence(String),
    Model(String),
}

impl fmt::Display for InfoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoItem::Documents(count) => write!(f, "documents: {count}"),
            InfoItem::Confidence(raw) => write!(f, "confidence: {}", raw.to_uppercase()),
            InfoItem::Model(name) => write!(f, "model: {name}"),
        }
    }
}

/// Compact summary of the latest assistant response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoPanel {
    pub items: Vec<InfoItem>,
}

impl InfoPanel {
    pub fn from_metadata(metadata: &ResponseMetadata) -> Self {
        let mut items = Vec::with_capacity(3);
        if let Some(count) = metadata.documents_found {
            items.push(InfoItem::Documents(count));
        }
        if let Some(confidence) = &metadata.confidence {
            items.push(InfoItem::Confidence(confidence.as_str().to_string()));
        }
        if let Some(model) = &metadata.model {
            items.push(InfoItem::Model(model.clone()));
        }
        Self { items }
    }

    pub fn lines(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}
