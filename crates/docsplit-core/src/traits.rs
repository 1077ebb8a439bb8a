//! Interfaces to the collaborators the splitter calls into.

use std::fmt;
use std::sync::Arc;

/// Word tokenizer used when splitting by word.
pub trait WordTokenizer: Send + Sync {
    /// Split text into word-like tokens.
    ///
    /// Concatenating the returned tokens must reproduce `text`; whitespace
    /// and punctuation are returned as tokens of their own or attached to
    /// words, never dropped.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> WordTokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Caller-supplied splitting strategy.
///
/// The splitter uses the returned units as they are, without re-attaching
/// any delimiter.
#[derive(Clone)]
pub struct SplittingFunction {
    name: String,
    func: Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>,
}

impl SplittingFunction {
    /// Wrap a function under a name recorded in the splitter configuration.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Name recorded in the splitter configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split text into units.
    pub fn split(&self, text: &str) -> Vec<String> {
        (self.func)(text)
    }
}

impl fmt::Debug for SplittingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplittingFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
