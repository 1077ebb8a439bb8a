//! Core domain types for document splitting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::SplitError;

/// Metadata key recording the id of the document a split came from.
pub const META_SOURCE_ID: &str = "source_id";
/// Metadata key recording the 1-based page a split starts on.
pub const META_PAGE_NUMBER: &str = "page_number";
/// Metadata key recording the 0-based index of a split within its source.
pub const META_SPLIT_ID: &str = "split_id";
/// Metadata key recording the character offset of a split within its source.
pub const META_SPLIT_IDX_START: &str = "split_idx_start";
/// Metadata key recording links to neighbouring splits sharing overlap.
pub const META_SPLIT_OVERLAP: &str = "_split_overlap";

/// Unit a document is segmented into before chunks are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SplitUnit {
    /// Word-like tokens produced by a tokenizer.
    #[default]
    Word,
    /// Runs terminated by full-width sentence punctuation.
    Sentence,
    /// Pages separated by form feeds.
    Page,
    /// Paragraphs separated by blank lines.
    Passage,
    /// Whatever a caller-supplied function returns.
    Function,
}

impl SplitUnit {
    /// All supported unit kinds.
    pub const ALL: [SplitUnit; 5] = [
        Self::Word,
        Self::Sentence,
        Self::Page,
        Self::Passage,
        Self::Function,
    ];

    /// Lowercase name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Sentence => "sentence",
            Self::Page => "page",
            Self::Passage => "passage",
            Self::Function => "function",
        }
    }
}

impl FromStr for SplitUnit {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| SplitError::unsupported_unit(s))
    }
}

impl TryFrom<String> for SplitUnit {
    type Error = SplitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for SplitUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document handed to the splitter.
///
/// The splitter never mutates a source document; it reads `content` and
/// copies `meta` into every split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: String,

    /// Text content. `None` for non-text documents.
    #[serde(default)]
    pub content: Option<String>,

    /// Caller-owned metadata.
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,
}

impl Document {
    /// Create a text document with an id derived from its content.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_meta(content, HashMap::new())
    }

    /// Create a text document with metadata and a derived id.
    pub fn with_meta(content: impl Into<String>, meta: HashMap<String, serde_json::Value>) -> Self {
        let content = content.into();
        Self {
            id: Self::content_id(Some(&content), &meta),
            content: Some(content),
            meta,
        }
    }

    /// Create a document without text content.
    pub fn without_content(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            meta: HashMap::new(),
        }
    }

    /// Derive a stable id from content and metadata.
    ///
    /// Metadata keys are hashed in sorted order, so the id does not depend
    /// on map iteration order.
    pub fn content_id(content: Option<&str>, meta: &HashMap<String, serde_json::Value>) -> String {
        let mut hasher = blake3::Hasher::new();
        if let Some(content) = content {
            hasher.update(content.as_bytes());
        }
        hasher.update(&[0]);

        let mut keys: Vec<&String> = meta.keys().collect();
        keys.sort();
        for key in keys {
            hasher.update(key.as_bytes());
            hasher.update(&[0]);
            hasher.update(meta[key].to_string().as_bytes());
            hasher.update(&[0]);
        }

        hex::encode(hasher.finalize().as_bytes())
    }
}

/// Link from one split to a neighbour that shares overlapping text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapLink {
    /// Id of the neighbouring split.
    pub doc_id: String,

    /// Character range of the shared text inside the neighbouring split.
    pub range: (usize, usize),
}

/// One chunk of a source document, with positional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSplit {
    /// Id derived from the split's content and metadata.
    pub id: String,

    /// Chunk text.
    pub content: String,

    /// Metadata copied from the source document.
    pub meta: HashMap<String, serde_json::Value>,

    /// Id of the source document.
    pub source_id: String,

    /// Index of this split within its source (0-based).
    pub split_id: usize,

    /// Page the split starts on (1-based).
    pub page_number: usize,

    /// Character offset of the split within the source content.
    pub split_idx_start: usize,

    /// Overlap links, present only when the splitter overlaps chunks.
    pub split_overlap: Option<Vec<OverlapLink>>,
}

impl DocumentSplit {
    /// Create a split, deriving its id from content and positional metadata.
    pub fn new(
        content: String,
        meta: HashMap<String, serde_json::Value>,
        source_id: &str,
        split_id: usize,
        page_number: usize,
        split_idx_start: usize,
    ) -> Self {
        let mut split = Self {
            id: String::new(),
            content,
            meta,
            source_id: source_id.to_string(),
            split_id,
            page_number,
            split_idx_start,
            split_overlap: None,
        };
        split.id = Document::content_id(Some(&split.content), &split.positional_meta());
        split
    }

    /// Length of the content in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Source metadata plus positional keys, without overlap links.
    fn positional_meta(&self) -> HashMap<String, serde_json::Value> {
        let mut meta = self.meta.clone();
        meta.insert(META_SOURCE_ID.to_string(), self.source_id.clone().into());
        meta.insert(META_PAGE_NUMBER.to_string(), self.page_number.into());
        meta.insert(META_SPLIT_ID.to_string(), self.split_id.into());
        meta.insert(META_SPLIT_IDX_START.to_string(), self.split_idx_start.into());
        meta
    }

    /// Flatten into a plain document carrying all positional keys in `meta`.
    pub fn to_document(&self) -> Document {
        let mut meta = self.positional_meta();
        if let Some(links) = &self.split_overlap {
            let links: Vec<serde_json::Value> = links
                .iter()
                .map(|link| {
                    serde_json::json!({
                        "doc_id": link.doc_id,
                        "range": [link.range.0, link.range.1],
                    })
                })
                .collect();
            meta.insert(META_SPLIT_OVERLAP.to_string(), links.into());
        }

        Document {
            id: self.id.clone(),
            content: Some(self.content.clone()),
            meta,
        }
    }
}
