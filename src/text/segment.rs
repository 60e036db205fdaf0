//! Sentence and script-run segmentation.
//!
//! Splits raw input into pieces small enough to hand to the voice selector:
//! first on sentence boundaries, then inside any sentence that mixes CJK and
//! Latin content, on the boundary between the two scripts. Every emitted
//! piece remembers where it started in the original input so downstream
//! consumers can map segments back to their source positions.

use super::script::{is_han, is_kana, is_latin_letter};

/// A contiguous piece of the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Borrowed slice of the original input text.
    pub text: &'a str,
    /// Start position in the original input, counted in Unicode scalar
    /// values (not bytes).
    pub offset: usize,
}

/// Sentence terminators. Newlines count so that line-structured input splits
/// per line even without punctuation.
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '。' | '！' | '？' | '\n' | '\r')
}

/// Wide CJK set used to carve script runs out of a mixed sentence: Han, kana,
/// CJK punctuation (U+3000-U+303F) and half/full-width forms (U+FF00-U+FFEF),
/// so CJK-adjacent punctuation stays with the CJK run it belongs to.
fn is_cjk_run(c: char) -> bool {
    matches!(c, '\u{3000}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}' | '\u{FF00}'..='\u{FFEF}')
}

/// Narrow CJK set used only to decide whether a sentence is mixed at all.
/// Deliberately excludes the punctuation/width blocks: a Latin sentence with
/// a full-width comma is not mixed content.
fn is_cjk_text(c: char) -> bool {
    is_han(c) || is_kana(c)
}

/// A maximal sentence-like run produced by the first splitting stage.
struct SentenceRun {
    byte_start: usize,
    byte_end: usize,
    /// Start position in scalar values, for offset bookkeeping.
    char_start: usize,
}

/// Stage one: split on sentence boundaries, keeping terminators attached to
/// the text they close. A run is either non-terminator text followed by any
/// number of terminators, or a bare stretch of terminators (orphan
/// punctuation is never dropped here).
fn split_sentence_runs(text: &str) -> Vec<SentenceRun> {
    let mut runs = Vec::new();
    let mut iter = text.char_indices().peekable();
    let mut char_pos = 0usize;

    while let Some(&(byte_start, first)) = iter.peek() {
        let char_start = char_pos;
        let mut byte_end = byte_start;

        // Body of the sentence, unless the run starts on a terminator.
        if !is_terminator(first) {
            while let Some(&(i, c)) = iter.peek() {
                if is_terminator(c) {
                    break;
                }
                byte_end = i + c.len_utf8();
                char_pos += 1;
                iter.next();
            }
        }

        // Trailing (or bare) terminators.
        while let Some(&(i, c)) = iter.peek() {
            if !is_terminator(c) {
                break;
            }
            byte_end = i + c.len_utf8();
            char_pos += 1;
            iter.next();
        }

        runs.push(SentenceRun { byte_start, byte_end, char_start });
    }

    runs
}

/// Stage two: split one mixed sentence into alternating CJK / non-CJK
/// segments, left to right. CJK stretches are always emitted; the gaps
/// between them are emitted only when they contain something besides
/// whitespace.
fn split_mixed_run<'a>(sentence: &'a str, char_start: usize, segments: &mut Vec<Segment<'a>>) {
    let mut gap_byte = 0usize; // relative byte offset where the current gap began
    let mut gap_char = 0usize;
    let mut char_pos = 0usize;
    let mut iter = sentence.char_indices().peekable();

    while let Some(&(i, c)) = iter.peek() {
        if !is_cjk_run(c) {
            char_pos += 1;
            iter.next();
            continue;
        }

        // Flush the non-CJK gap before this stretch.
        if i > gap_byte {
            let gap = &sentence[gap_byte..i];
            if !gap.trim().is_empty() {
                segments.push(Segment { text: gap, offset: char_start + gap_char });
            }
        }

        // Consume the maximal CJK stretch.
        let stretch_byte = i;
        let stretch_char = char_pos;
        let mut stretch_end = i;
        while let Some(&(j, d)) = iter.peek() {
            if !is_cjk_run(d) {
                break;
            }
            stretch_end = j + d.len_utf8();
            char_pos += 1;
            iter.next();
        }
        segments.push(Segment { text: &sentence[stretch_byte..stretch_end], offset: char_start + stretch_char });

        gap_byte = stretch_end;
        gap_char = char_pos;
    }

    // Remainder after the last CJK stretch.
    if gap_byte < sentence.len() {
        let rest = &sentence[gap_byte..];
        if !rest.trim().is_empty() {
            segments.push(Segment { text: rest, offset: char_start + gap_char });
        }
    }
}

/// Split input text into segments suitable for per-segment language
/// detection.
///
/// Sentences are split first (terminators stay attached); any sentence that
/// contains both CJK and Latin content is further split into script runs.
/// Whitespace-only pieces are dropped. Offsets index the original input in
/// Unicode scalar values.
///
/// Total over all inputs: the empty string yields an empty vec, and any
/// input with at least one non-whitespace character yields at least one
/// segment (the entire input, as a last resort).
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();

    for run in split_sentence_runs(text) {
        let sentence = &text[run.byte_start..run.byte_end];

        let mixed = sentence.chars().any(is_cjk_text) && sentence.chars().any(is_latin_letter);
        if mixed {
            split_mixed_run(sentence, run.char_start, &mut segments);
        } else if !sentence.trim().is_empty() {
            segments.push(Segment { text: sentence, offset: run.char_start });
        }
    }

    // Never silently drop a non-empty input.
    if segments.is_empty() && !text.trim().is_empty() {
        segments.push(Segment { text, offset: 0 });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Slice `text` at [offset, offset + len) counted in scalar values.
    fn slice_by_chars(text: &str, offset: usize, len: usize) -> String {
        text.chars().skip(offset).take(len).collect()
    }

    /// Offsets must be non-decreasing and each must index the segment's text
    /// exactly, in scalar values.
    fn assert_offsets_consistent(text: &str, segments: &[Segment<'_>]) {
        let mut last_offset = 0;
        for seg in segments {
            assert!(seg.offset >= last_offset, "offsets went backwards at {:?}", seg);
            last_offset = seg.offset;
            let char_len = seg.text.chars().count();
            assert_eq!(slice_by_chars(text, seg.offset, char_len), seg.text, "offset {} does not index {:?}", seg.offset, seg.text);
        }
    }

    /// Concatenated segments must reproduce the original's non-whitespace
    /// content in order (whitespace-only material may be dropped).
    fn assert_reconstruction(text: &str, segments: &[Segment<'_>]) {
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let rebuilt_non_ws: String = rebuilt.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(rebuilt_non_ws, original);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(segment("   \n\t ").is_empty());
    }

    #[test]
    fn test_single_sentence() {
        let segments = segment("Hello there.");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Hello there.");
        assert_eq!(segments[0].offset, 0);
    }

    #[test]
    fn test_terminator_stays_attached() {
        let segments = segment("One. Two! Three?");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "One.");
        assert_eq!(segments[1].text, " Two!");
        assert_eq!(segments[2].text, " Three?");
        assert_offsets_consistent("One. Two! Three?", &segments);
    }

    #[test]
    fn test_bare_punctuation_run_is_kept() {
        let segments = segment("!!!");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "!!!");
        assert_eq!(segments[0].offset, 0);
    }

    #[test]
    fn test_consecutive_terminators_merge_into_one_run() {
        let segments = segment("Wait...!? Done.");
        assert_eq!(segments[0].text, "Wait...!?");
        assert_eq!(segments[1].text, " Done.");
    }

    #[test]
    fn test_cjk_sentence_terminators() {
        let segments = segment("你好。再见！");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "你好。");
        assert_eq!(segments[0].offset, 0);
        assert_eq!(segments[1].text, "再见！");
        assert_eq!(segments[1].offset, 3);
    }

    #[test]
    fn test_newlines_split_sentences() {
        let segments = segment("第一行\n第二行");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "第一行\n");
        assert_eq!(segments[1].text, "第二行");
        assert_eq!(segments[1].offset, 4);
    }

    #[test]
    fn test_mixed_han_latin_splits_into_script_runs() {
        let text = "我爱Python编程";
        let segments = segment(text);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "我爱");
        assert_eq!(segments[0].offset, 0);
        assert_eq!(segments[1].text, "Python");
        assert_eq!(segments[1].offset, 2);
        assert_eq!(segments[2].text, "编程");
        assert_eq!(segments[2].offset, 8);
        assert_offsets_consistent(text, &segments);
        assert_reconstruction(text, &segments);
    }

    #[test]
    fn test_mixed_run_with_leading_latin() {
        let text = "Python是很好的语言";
        let segments = segment(text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Python");
        assert_eq!(segments[0].offset, 0);
        assert_eq!(segments[1].text, "是很好的语言");
        assert_eq!(segments[1].offset, 6);
    }

    #[test]
    fn test_cjk_terminator_joins_cjk_run() {
        // 。 belongs to the CJK punctuation block, so it rides along with
        // the Han stretch instead of becoming a separate gap.
        let segments = segment("我用Rust。");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "我用");
        assert_eq!(segments[1].text, "Rust");
        assert_eq!(segments[2].text, "。");
        assert_eq!(segments[2].offset, 6);
    }

    #[test]
    fn test_latin_gap_keeps_surrounding_spaces() {
        let text = "我喜欢 Rust 编程";
        let segments = segment(text);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["我喜欢", " Rust ", "编程"]);
        assert_offsets_consistent(text, &segments);
    }

    #[test]
    fn test_whitespace_only_gap_is_dropped() {
        // The space between 你好 and ！ is a whitespace-only gap between two
        // CJK stretches; it vanishes instead of becoming its own segment.
        let text = "hello你好 ！";
        let segments = segment(text);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["hello", "你好", "！"]);
        assert_eq!(segments[2].offset, 8);
        assert_reconstruction(text, &segments);
    }

    #[test]
    fn test_fullwidth_latin_sentence_is_not_mixed() {
        // Full-width punctuation alone does not make Latin text "mixed".
        let segments = segment("Ｈello，ｗorld");
        // Mixed detection sees no Han/kana, so the run survives whole.
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_multi_sentence_mixed_offsets() {
        let text = "你好world。Bye了";
        let segments = segment(text);
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["你好", "world", "。", "Bye", "了"]);
        assert_offsets_consistent(text, &segments);
        assert_reconstruction(text, &segments);
    }

    #[test]
    fn test_japanese_latin_mix() {
        let text = "カタカナとLatin";
        let segments = segment(text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "カタカナと");
        assert_eq!(segments[1].text, "Latin");
        assert_eq!(segments[1].offset, 5);
    }

    #[test]
    fn test_symbols_only_input_is_one_segment() {
        let segments = segment("@@@");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "@@@");
    }

    #[test]
    fn test_no_drop_guarantee() {
        for text in ["x", "。", "漢", " a ", "1+1", "你好hello", "…\n…"] {
            assert!(!segment(text).is_empty(), "non-empty input {:?} produced no segments", text);
        }
    }

    #[test]
    fn test_reconstruction_and_offsets_hold_broadly() {
        let inputs = [
            "Hello world. 你好世界。すごい!",
            "我係香港人，I live in Hong Kong.",
            "line one\r\nline two\n三行目",
            "A.B.C. 中文mixed中文 end",
            "！？。.!?",
        ];
        for text in inputs {
            let segments = segment(text);
            assert_offsets_consistent(text, &segments);
            assert_reconstruction(text, &segments);
        }
    }
}
