//! Unit segmentation.
//!
//! Turns raw text into the ordered units chunks are assembled from. Every
//! strategy except the custom function keeps the text reconstructable:
//! concatenating the units gives back the input.

use std::fmt;
use std::sync::{Arc, OnceLock};

use docsplit_core::{Result, SplitError, SplitUnit, SplittingFunction, WordTokenizer};
use regex::Regex;

/// Page break delimiter.
pub const PAGE_BREAK: &str = "\x0c";

/// Passage delimiter.
pub const PASSAGE_BREAK: &str = "\n\n";

/// Full-width punctuation that ends a sentence.
pub const SENTENCE_TERMINATORS: [char; 3] = ['。', '？', '！'];

static SENTENCE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Units produced from one text, with the delimiter that separated them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Ordered units, delimiters already attached.
    pub units: Vec<String>,

    /// Delimiter re-attached to the units. `None` when the units carry their
    /// own separators: word units keep the tokenizer's whitespace, and a
    /// custom function owns its delimiting.
    pub delimiter: Option<&'static str>,
}

/// Segmentation strategy, one variant per unit kind.
#[derive(Clone)]
pub enum Segmenter {
    /// Tokenizer words with trailing whitespace attached.
    Word(Arc<dyn WordTokenizer>),
    /// Runs ending in a sentence terminator.
    Sentence,
    /// Form-feed separated pages.
    Page,
    /// Blank-line separated passages.
    Passage,
    /// Caller-supplied function.
    Function(SplittingFunction),
}

impl Segmenter {
    /// Build the segmenter for a unit kind.
    ///
    /// `function` is required for [`SplitUnit::Function`] and ignored otherwise.
    pub fn new(
        unit: SplitUnit,
        tokenizer: Arc<dyn WordTokenizer>,
        function: Option<SplittingFunction>,
    ) -> Result<Self> {
        match unit {
            SplitUnit::Word => Ok(Self::Word(tokenizer)),
            SplitUnit::Sentence => Ok(Self::Sentence),
            SplitUnit::Page => Ok(Self::Page),
            SplitUnit::Passage => Ok(Self::Passage),
            SplitUnit::Function => function
                .map(Self::Function)
                .ok_or_else(|| SplitError::unsupported_unit("function (no splitting function provided)")),
        }
    }

    /// Unit kind this segmenter produces.
    pub fn unit(&self) -> SplitUnit {
        match self {
            Self::Word(_) => SplitUnit::Word,
            Self::Sentence => SplitUnit::Sentence,
            Self::Page => SplitUnit::Page,
            Self::Passage => SplitUnit::Passage,
            Self::Function(_) => SplitUnit::Function,
        }
    }

    /// Split text into units.
    pub fn segment(&self, text: &str) -> Segmentation {
        match self {
            Self::Function(func) => Segmentation {
                units: func.split(text),
                delimiter: None,
            },
            Self::Page => Segmentation {
                units: split_keeping_delimiter(text, PAGE_BREAK),
                delimiter: Some(PAGE_BREAK),
            },
            Self::Passage => Segmentation {
                units: split_keeping_delimiter(text, PASSAGE_BREAK),
                delimiter: Some(PASSAGE_BREAK),
            },
            Self::Sentence => Segmentation {
                units: split_sentences(text),
                delimiter: Some(""),
            },
            Self::Word(tokenizer) => Segmentation {
                units: attach_whitespace(tokenizer.tokenize(text)),
                delimiter: None,
            },
        }
    }
}

impl fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(func) => f.debug_tuple("Function").field(func).finish(),
            other => write!(f, "{}", other.unit()),
        }
    }
}

/// Whether a unit closes a sentence.
pub fn ends_sentence(unit: &str) -> bool {
    unit.trim_end().ends_with(&SENTENCE_TERMINATORS[..])
}

/// Split on a delimiter and re-attach it to every unit but the last.
fn split_keeping_delimiter(text: &str, delimiter: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut units: Vec<String> = text.split(delimiter).map(String::from).collect();
    let last = units.len() - 1;
    for unit in &mut units[..last] {
        unit.push_str(delimiter);
    }
    units
}

/// Collect runs of text ending in a sentence terminator.
///
/// Text after the last terminator does not form a sentence and is dropped.
fn split_sentences(text: &str) -> Vec<String> {
    let re = SENTENCE_REGEX.get_or_init(|| {
        Regex::new(r"[^。？！]*[。？！]").expect("valid sentence regex")
    });
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Fold whitespace tokens into the preceding token.
///
/// Leading whitespace goes to the first token. Whitespace-delimited text
/// therefore yields `"word "` units, and text without spaces gets none added.
fn attach_whitespace(tokens: Vec<String>) -> Vec<String> {
    let mut units: Vec<String> = Vec::with_capacity(tokens.len());
    let mut leading = String::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        if token.chars().all(char::is_whitespace) {
            match units.last_mut() {
                Some(last) => last.push_str(&token),
                None => leading.push_str(&token),
            }
        } else if leading.is_empty() {
            units.push(token);
        } else {
            units.push(std::mem::take(&mut leading) + &token);
        }
    }

    // Whitespace-only text
    if !leading.is_empty() {
        units.push(leading);
    }
    units
}
