//! docsplit-chunk - Unit segmentation and chunk assembly
//!
//! This crate splits text documents into overlapping, size-bounded chunks
//! for indexing or embedding, keeping each chunk's offset and page in the
//! source document.
//!
//! # Components
//!
//! - [`Segmenter`]: Turns text into ordered units (words, sentences, pages,
//!   passages, or the output of a custom function).
//!
//! - [`UnicodeWordTokenizer`]: Default word tokenizer. It splits Han text
//!   into single characters, so `split_length` then counts characters. For
//!   Chinese word units plug in a dictionary tokenizer (jieba or similar)
//!   with [`DocumentSplitter::with_tokenizer`].
//!
//! - [`assemble`]: Groups units into windows with overlap and merges an
//!   undersized final chunk into its predecessor.
//!
//! - [`DocumentSplitter`]: Applies both to lists of documents and records
//!   where every split came from.
//!
//! # Example
//!
//! ```rust
//! use docsplit_chunk::{Document, DocumentSplitter, SplitUnit, SplitterConfig};
//!
//! let config = SplitterConfig::new(SplitUnit::Sentence).with_window(1, 0);
//! let splitter = DocumentSplitter::new(config).unwrap();
//! let splits = splitter.run(&[Document::new("你好。今天天气不错！")]).unwrap();
//!
//! assert_eq!(splits.len(), 2);
//! assert_eq!(splits[1].content, "今天天气不错！");
//! assert_eq!(splits[1].split_idx_start, 3);
//! ```

mod assemble;
mod segment;
mod splitter;
mod tokenizer;

pub use assemble::{assemble, AssemblyParams, Chunk};
pub use segment::{
    ends_sentence, Segmentation, Segmenter, PAGE_BREAK, PASSAGE_BREAK, SENTENCE_TERMINATORS,
};
pub use splitter::DocumentSplitter;
pub use tokenizer::UnicodeWordTokenizer;

// Re-export types for convenience
pub use docsplit_core::{
    Document, DocumentSplit, OverlapLink, SplitError, SplitUnit, SplitterConfig,
    SplittingFunction, WordTokenizer,
};
