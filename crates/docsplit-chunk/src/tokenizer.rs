//! Default word tokenizer.

use docsplit_core::WordTokenizer;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenizer based on Unicode word boundaries (UAX #29).
///
/// Returns every segment, whitespace and punctuation included, so the
/// tokens always concatenate back to the input. Ideographic text is split
/// per character, so word counts become character counts for Chinese
/// text. Pass a dictionary tokenizer (jieba or similar) to
/// `DocumentSplitter::with_tokenizer` to split by real CJK words.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        Self
    }
}

impl WordTokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_word_bounds().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_is_lossless() {
        let tokenizer = UnicodeWordTokenizer::new();
        let text = "Pipelines 管道可以分支、合并。 Done!";
        assert_eq!(tokenizer.tokenize(text).concat(), text);
    }

    #[test]
    fn test_tokenize_latin_words() {
        let tokens = UnicodeWordTokenizer::new().tokenize("can't stop");
        assert_eq!(tokens, vec!["can't", " ", "stop"]);
    }

    #[test]
    fn test_tokenize_han_per_character() {
        let tokens = UnicodeWordTokenizer::new().tokenize("天气");
        assert_eq!(tokens, vec!["天", "气"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(UnicodeWordTokenizer::new().tokenize("").is_empty());
    }
}
