use crate::metadata::ResponseMetadata;

pub const USER_LABEL: &str = "You:";
pub const ASSISTANT_LABEL: &str = "Assistant:";
pub const SOURCES_HEADER: &str = "Sources consulted:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// One transcript unit. Only assistant entries carry metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    author: Author,
    text: String,
    metadata: Option<ResponseMetadata>,
}

impl ChatEntry {
    pub fn new(author: Author, text: impl Into<String>, metadata: Option<ResponseMetadata>) -> Self {
        match author {
            Author::User => Self::user(text),
            Author::Assistant => Self::assistant(text, metadata),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            metadata: None,
        }
    }

    pub fn assistant(text: impl Into<String>, metadata: Option<ResponseMetadata>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
            metadata,
        }
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> Option<&ResponseMetadata> {
        self.metadata.as_ref()
    }

    /// Display lines: label, message, then the optional sources block and
    /// confidence line.
    pub fn lines(&self) -> Vec<String> {
        let label = match self.author {
            Author::User => USER_LABEL,
            Author::Assistant => ASSISTANT_LABEL,
        };
        let mut lines = vec![label.to_string()];
        lines.extend(self.text.lines().map(ToOwned::to_owned));

        let Some(metadata) = &self.metadata else {
            return lines;
        };

        if !metadata.sources.is_empty() {
            lines.push(String::new());
            lines.push(SOURCES_HEADER.to_string());
            for (index, source) in metadata.sources.iter().enumerate() {
                lines.push(format!(
                    "{}. {}: {}",
                    index + 1,
                    source.filename,
                    source.preview
                ));
            }
        }

        if let Some(confidence) = &metadata.confidence {
            let line = match confidence.badge() {
                Some(badge) => format!("{badge} Confidence: {confidence}"),
                None => format!("Confidence: {confidence}"),
            };
            lines.push(String::new());
            lines.push(line);
        }

        lines
    }
}

/// Append-only list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends and returns the index of the new entry.
    pub fn append(&mut self, entry: ChatEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }
}
