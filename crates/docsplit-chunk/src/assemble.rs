//! Chunk assembly.
//!
//! Groups consecutive units into overlapping windows and tracks where each
//! chunk starts in the source text. The logic is shared by every unit kind.

use std::ops::Range;

use docsplit_core::SplitterConfig;

use crate::segment::{ends_sentence, PAGE_BREAK};

/// Windowing parameters, all counted in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyParams {
    /// Maximum units per chunk.
    pub split_length: usize,

    /// Units shared by consecutive chunks.
    pub split_overlap: usize,

    /// A final chunk with fewer units is merged into its predecessor.
    pub split_threshold: usize,

    /// Extend chunks forward so none ends mid-sentence.
    pub respect_sentence_boundary: bool,
}

impl From<&SplitterConfig> for AssemblyParams {
    fn from(config: &SplitterConfig) -> Self {
        Self {
            split_length: config.split_length,
            split_overlap: config.split_overlap,
            split_threshold: config.split_threshold,
            respect_sentence_boundary: config.respect_sentence_boundary,
        }
    }
}

impl AssemblyParams {
    fn step(&self) -> usize {
        self.split_length.saturating_sub(self.split_overlap).max(1)
    }
}

/// An assembled chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Concatenated unit text.
    pub text: String,

    /// Page the chunk starts on (1-based).
    pub page_number: usize,

    /// Character offset of the chunk in the source text.
    pub start_offset: usize,

    /// Units the chunk was built from.
    pub units: Range<usize>,
}

impl Chunk {
    /// Number of units in the chunk.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

/// Assemble units into chunks.
///
/// Offsets and page numbers are derived from the units preceding each
/// chunk, so they are exact as long as the units concatenate back to the
/// source text. Windows whose text is empty are skipped.
pub fn assemble<S: AsRef<str>>(units: &[S], params: &AssemblyParams) -> Vec<Chunk> {
    let windows = if params.respect_sentence_boundary {
        sentence_windows(units, params)
    } else {
        fixed_windows(units.len(), params)
    };

    // Prefix sums over the units: chars and page breaks before unit i.
    let mut offsets = Vec::with_capacity(units.len() + 1);
    let mut pages = Vec::with_capacity(units.len() + 1);
    let (mut offset, mut page) = (0, 1);
    offsets.push(offset);
    pages.push(page);
    for unit in units {
        let unit: &str = unit.as_ref();
        offset += unit.chars().count();
        page += unit.matches(PAGE_BREAK).count();
        offsets.push(offset);
        pages.push(page);
    }

    let mut chunks: Vec<Chunk> = Vec::with_capacity(windows.len());
    let last = windows.len().saturating_sub(1);

    for (i, window) in windows.into_iter().enumerate() {
        if i == last && window.len() < params.split_threshold {
            if let Some(previous) = chunks.last_mut() {
                let from = previous.units.end.max(window.start);
                previous.text.push_str(&concat(&units[from..window.end]));
                previous.units.end = window.end;
                continue;
            }
        }

        let text = concat(&units[window.clone()]);
        if text.is_empty() {
            continue;
        }
        chunks.push(Chunk {
            text,
            page_number: pages[window.start],
            start_offset: offsets[window.start],
            units: window,
        });
    }

    chunks
}

fn concat<S: AsRef<str>>(units: &[S]) -> String {
    units.iter().map(|unit| unit.as_ref()).collect::<String>()
}

/// Windows of `split_length` units advancing by `split_length - split_overlap`.
///
/// Stops after the first window reaching the last unit, so only the final
/// window can be short.
fn fixed_windows(len: usize, params: &AssemblyParams) -> Vec<Range<usize>> {
    let mut windows = Vec::new();
    let mut start = 0;
    while start < len {
        let end = (start + params.split_length).min(len);
        windows.push(start..end);
        if end == len {
            break;
        }
        start += params.step();
    }
    windows
}

/// Like [`fixed_windows`], but a window ending mid-sentence is extended up
/// to and including the next unit that closes a sentence.
///
/// The next window starts `split_overlap` units before the extended end.
fn sentence_windows<S: AsRef<str>>(units: &[S], params: &AssemblyParams) -> Vec<Range<usize>> {
    let len = units.len();
    let mut windows = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = (start + params.split_length.max(1)).min(len);
        while end < len && !ends_sentence(units[end - 1].as_ref()) {
            end += 1;
        }
        windows.push(start..end);
        if end == len {
            break;
        }
        start = end.saturating_sub(params.split_overlap).max(start + 1);
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(split_length: usize, split_overlap: usize, split_threshold: usize) -> AssemblyParams {
        AssemblyParams {
            split_length,
            split_overlap,
            split_threshold,
            respect_sentence_boundary: false,
        }
    }

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    fn offsets(chunks: &[Chunk]) -> Vec<usize> {
        chunks.iter().map(|c| c.start_offset).collect()
    }

    const WORDS: [&str; 5] = ["A ", "B ", "C ", "D ", "E"];

    #[test]
    fn test_overlapping_windows() {
        let chunks = assemble(&WORDS, &params(3, 1, 0));
        assert_eq!(texts(&chunks), vec!["A B C ", "C D E"]);
        assert_eq!(offsets(&chunks), vec![0, 4]);
        assert_eq!(chunks[1].units, 2..5);
    }

    #[test]
    fn test_short_final_window() {
        let chunks = assemble(&WORDS, &params(2, 0, 0));
        assert_eq!(texts(&chunks), vec!["A B ", "C D ", "E"]);
        assert_eq!(offsets(&chunks), vec![0, 4, 8]);
        assert_eq!(chunks[2].unit_count(), 1);
    }

    #[test]
    fn test_overlap_does_not_emit_tail_window() {
        // The window starting at the last unit is never produced once a
        // previous window already reached the end.
        let chunks = assemble(&["a", "b", "c", "d"], &params(2, 1, 0));
        assert_eq!(texts(&chunks), vec!["ab", "bc", "cd"]);
    }

    #[test]
    fn test_threshold_merges_final_chunk() {
        let chunks = assemble(&WORDS, &params(2, 0, 2));
        assert_eq!(texts(&chunks), vec!["A B ", "C D E"]);
        assert_eq!(offsets(&chunks), vec![0, 4]);
        assert_eq!(chunks[1].units, 2..5);
    }

    #[test]
    fn test_threshold_merge_skips_overlapping_units() {
        let units = ["a", "b", "c", "d", "e", "f"];
        let chunks = assemble(&units, &params(3, 1, 3));
        assert_eq!(texts(&chunks), vec!["abc", "cdef"]);
        assert_eq!(chunks[1].units, 2..6);
    }

    #[test]
    fn test_threshold_without_predecessor() {
        let chunks = assemble(&["a", "b"], &params(5, 0, 3));
        assert_eq!(texts(&chunks), vec!["ab"]);
    }

    #[test]
    fn test_threshold_only_applies_to_final_chunk() {
        let chunks = assemble(&WORDS, &params(2, 0, 3));
        assert_eq!(texts(&chunks), vec!["A B ", "C D E"]);
    }

    #[test]
    fn test_page_numbers() {
        let units = ["p1\x0c", "p2\x0c", "p3\x0c", "p4"];
        let chunks = assemble(&units, &params(1, 0, 0));
        let pages: Vec<usize> = chunks.iter().map(|c| c.page_number).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_page_numbers_inside_units() {
        let units = ["一。", "二\x0c\x0c三。", "四。", "五。"];
        let chunks = assemble(&units, &params(2, 0, 0));
        assert_eq!(chunks[0].page_number, 1);
        assert_eq!(chunks[1].page_number, 3);
    }

    #[test]
    fn test_offsets_count_chars() {
        let units = ["你好。", "世界！", "再见。"];
        let chunks = assemble(&units, &params(1, 0, 0));
        assert_eq!(offsets(&chunks), vec![0, 3, 6]);
    }

    #[test]
    fn test_empty_windows_are_skipped() {
        let units = ["", "", "x", ""];
        let chunks = assemble(&units, &params(2, 0, 0));
        assert_eq!(texts(&chunks), vec!["x"]);
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[0].units, 2..4);
    }

    #[test]
    fn test_no_units() {
        let units: [&str; 0] = [];
        assert!(assemble(&units, &params(3, 1, 2)).is_empty());
    }

    #[test]
    fn test_sentence_boundary_extends_forward() {
        let units = ["今", "天", "好", "。", "明", "天", "呢", "？", "好"];
        let p = AssemblyParams {
            respect_sentence_boundary: true,
            ..params(2, 0, 0)
        };
        let chunks = assemble(&units, &p);
        assert_eq!(texts(&chunks), vec!["今天好。", "明天呢？", "好"]);
        assert_eq!(offsets(&chunks), vec![0, 4, 8]);
    }

    #[test]
    fn test_sentence_boundary_with_overlap() {
        let units = ["a", "b。", "c", "d", "e。", "f"];
        let p = AssemblyParams {
            respect_sentence_boundary: true,
            ..params(2, 1, 0)
        };
        let chunks = assemble(&units, &p);
        assert_eq!(texts(&chunks), vec!["ab。", "b。cde。", "e。f"]);
    }

    #[test]
    fn test_sentence_boundary_needs_unit_ending_sentence() {
        // A terminator inside a unit does not close the window.
        let units = ["好。明", "天", "见！", "再"];
        let p = AssemblyParams {
            respect_sentence_boundary: true,
            ..params(1, 0, 0)
        };
        let chunks = assemble(&units, &p);
        assert_eq!(texts(&chunks), vec!["好。明天见！", "再"]);
    }

    #[test]
    fn test_sentence_boundary_keeps_aligned_windows() {
        let units = ["一。", "二。", "三。"];
        let p = AssemblyParams {
            respect_sentence_boundary: true,
            ..params(2, 0, 0)
        };
        let chunks = assemble(&units, &p);
        assert_eq!(texts(&chunks), vec!["一。二。", "三。"]);
    }

    #[test]
    fn test_coverage_without_gaps() {
        let units: Vec<String> = (0..23).map(|i| format!("u{} ", i)).collect();
        let source = units.concat();
        for (length, overlap, threshold) in [(4, 0, 0), (4, 3, 0), (5, 2, 3), (7, 1, 10), (1, 0, 2)] {
            let chunks = assemble(&units, &params(length, overlap, threshold));
            let mut covered = 0;
            for chunk in &chunks {
                assert!(chunk.start_offset <= covered, "gap before {:?}", chunk);
                assert!(source[chunk.start_offset..].starts_with(&chunk.text));
                covered = covered.max(chunk.start_offset + chunk.text.len());
            }
            assert_eq!(covered, source.len());
        }
    }

    #[test]
    fn test_size_bound_and_monotonic_offsets() {
        let units: Vec<String> = (0..50).map(|i| format!("w{} ", i)).collect();
        for (length, overlap) in [(3, 0), (3, 2), (10, 4)] {
            let chunks = assemble(&units, &params(length, overlap, 0));
            assert!(chunks.iter().all(|c| c.unit_count() <= length));
            for pair in chunks.windows(2) {
                if overlap == 0 {
                    assert!(pair[0].start_offset < pair[1].start_offset);
                } else {
                    assert!(pair[0].start_offset <= pair[1].start_offset);
                }
            }
        }
    }
}
