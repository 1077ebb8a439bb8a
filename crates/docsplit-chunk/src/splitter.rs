//! Document-level splitting.

use std::sync::Arc;

use docsplit_core::{
    Document, DocumentSplit, OverlapLink, Result, SplitError, SplitUnit, SplitterConfig,
    SplittingFunction, WordTokenizer,
};
use tracing::{debug, info, warn};

use crate::assemble::{assemble, AssemblyParams, Chunk};
use crate::segment::Segmenter;
use crate::UnicodeWordTokenizer;

/// Splits documents into overlapping, size-bounded chunks.
///
/// Configuration is validated once at construction and never changes, so a
/// splitter can be shared across threads and reused for any number of calls.
#[derive(Debug, Clone)]
pub struct DocumentSplitter {
    config: SplitterConfig,
    params: AssemblyParams,
    segmenter: Segmenter,
}

impl DocumentSplitter {
    /// Create a splitter from configuration.
    ///
    /// Function units need a function; use [`DocumentSplitter::with_function`].
    pub fn new(config: SplitterConfig) -> Result<Self> {
        Self::from_config(config, None)
    }

    /// Create a splitter using a custom splitting function.
    pub fn with_function(config: SplitterConfig, function: SplittingFunction) -> Result<Self> {
        Self::from_config(config, Some(function))
    }

    /// Rebuild a splitter from configuration and an optional function.
    ///
    /// The function's own name replaces the one recorded in `config`.
    pub fn from_config(mut config: SplitterConfig, function: Option<SplittingFunction>) -> Result<Self> {
        config.validate()?;

        if config.respect_sentence_boundary && config.split_by != SplitUnit::Word {
            warn!(
                "respect_sentence_boundary only applies to word units, ignoring it for {}",
                config.split_by
            );
            config.respect_sentence_boundary = false;
        }

        if let Some(function) = &function {
            config.splitting_function = Some(function.name().to_string());
        }

        let tokenizer: Arc<dyn WordTokenizer> = Arc::new(UnicodeWordTokenizer::new());
        let segmenter = Segmenter::new(config.split_by, tokenizer, function)?;

        Ok(Self {
            params: AssemblyParams::from(&config),
            config,
            segmenter,
        })
    }

    /// Replace the word tokenizer. Has no effect for other unit kinds.
    pub fn with_tokenizer<T>(mut self, tokenizer: T) -> Self
    where
        T: WordTokenizer + 'static,
    {
        if let Segmenter::Word(_) = self.segmenter {
            self.segmenter = Segmenter::Word(Arc::new(tokenizer));
        }
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Configuration that rebuilds an equivalent splitter via
    /// [`DocumentSplitter::from_config`].
    pub fn to_config(&self) -> SplitterConfig {
        self.config.clone()
    }

    /// Segment and assemble a single text.
    pub fn split_text(&self, text: &str) -> Vec<Chunk> {
        let segmentation = self.segmenter.segment(text);
        let chunks = assemble(&segmentation.units, &self.params);
        debug!(
            "Split text into {} {} units and {} chunks",
            segmentation.units.len(),
            self.config.split_by,
            chunks.len()
        );
        chunks
    }

    /// Split one document.
    ///
    /// Fails with `MissingContent` when the content is absent and with
    /// `EmptyContent` when it is the empty string.
    pub fn split_document(&self, doc: &Document) -> Result<Vec<DocumentSplit>> {
        let content = doc
            .content
            .as_deref()
            .ok_or_else(|| SplitError::missing_content(&doc.id))?;
        if content.is_empty() {
            return Err(SplitError::empty_content(&doc.id));
        }

        let mut splits: Vec<DocumentSplit> = self
            .split_text(content)
            .into_iter()
            .enumerate()
            .map(|(split_id, chunk)| {
                DocumentSplit::new(
                    chunk.text,
                    doc.meta.clone(),
                    &doc.id,
                    split_id,
                    chunk.page_number,
                    chunk.start_offset,
                )
            })
            .collect();

        if self.config.split_overlap > 0 {
            link_overlaps(&mut splits);
        }

        debug!("Document {} split into {} parts", doc.id, splits.len());
        Ok(splits)
    }

    /// Split a list of documents.
    ///
    /// Documents with empty content are skipped with a warning. Any other
    /// error aborts the call without partial results.
    pub fn run(&self, documents: &[Document]) -> Result<Vec<DocumentSplit>> {
        let mut split_docs = Vec::new();

        for doc in documents {
            match self.split_document(doc) {
                Ok(splits) => split_docs.extend(splits),
                Err(e) if e.is_recoverable() => {
                    warn!(doc_id = %doc.id, "Document has an empty content. Skipping this document.");
                }
                Err(e) => return Err(e),
            }
        }

        info!("Document splitting completed. Total splits: {}", split_docs.len());
        Ok(split_docs)
    }

    /// Split documents given as untyped JSON.
    ///
    /// The value must be an array of document objects.
    pub fn run_json(&self, value: &serde_json::Value) -> Result<Vec<DocumentSplit>> {
        let items = value.as_array().ok_or_else(|| {
            SplitError::invalid_input("DocumentSplitter expects a list of documents as input")
        })?;

        let documents = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.is_object() {
                    return Err(SplitError::invalid_input(format!(
                        "element {} is not a document object",
                        i
                    )));
                }
                serde_json::from_value::<Document>(item.clone()).map_err(|e| {
                    SplitError::invalid_input(format!("element {} is not a document: {}", i, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.run(&documents)
    }
}

/// Record which neighbouring splits share text.
///
/// Both splits of an overlapping pair get a link; ranges are in characters
/// and point into the linked split.
fn link_overlaps(splits: &mut [DocumentSplit]) {
    for split in splits.iter_mut() {
        split.split_overlap = Some(Vec::new());
    }

    for i in 1..splits.len() {
        let (head, tail) = splits.split_at_mut(i);
        let previous = &mut head[i - 1];
        let current = &mut tail[0];

        let overlap_start = current.split_idx_start.saturating_sub(previous.split_idx_start);
        let previous_len = previous.char_len();
        if overlap_start >= previous_len {
            continue;
        }

        let shared: String = previous.content.chars().skip(overlap_start).collect();
        if !current.content.starts_with(&shared) {
            continue;
        }

        if let Some(links) = current.split_overlap.as_mut() {
            links.push(OverlapLink {
                doc_id: previous.id.clone(),
                range: (overlap_start, previous_len),
            });
        }
        if let Some(links) = previous.split_overlap.as_mut() {
            links.push(OverlapLink {
                doc_id: current.id.clone(),
                range: (0, previous_len - overlap_start),
            });
        }
    }
}
