//! Script and language detection for text spans.
//!
//! Detection works on raw code-point ranges rather than dictionaries, so it is
//! cheap enough to run on every segment of every input.

/// Language detected for a span of text.
///
/// Exactly one tag applies to any span; `Neutral` means no recognized script
/// character was found (digits, symbols, whitespace only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    /// Japanese (any Hiragana or Katakana present)
    Japanese,
    /// Cantonese (Han text containing Cantonese-specific characters)
    Cantonese,
    /// Mandarin Chinese (Han text without Cantonese markers)
    Chinese,
    /// English or other Latin-alphabet text
    Latin,
    /// No recognized script characters
    Neutral,
}

impl Lang {
    /// Short language code used for logging and voice lookup.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Japanese => "ja",
            Lang::Cantonese => "yue",
            Lang::Chinese => "zh",
            Lang::Latin => "en",
            Lang::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Han characters idiomatic to written Cantonese. Ordinary Han text never
/// uses these, so a single occurrence is a reliable signal.
const CANTONESE_MARKERS: &[char] = &['係', '唔', '佢', '嘅', '冇', '睇', '咗', '嚟', '喺', '哋', '俾', '諗', '乜', '嘢', '咁', '喎'];

/// True for Hiragana (U+3040-U+309F) or Katakana (U+30A0-U+30FF).
pub fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{30FF}')
}

/// True for CJK Unified Ideographs (U+4E00-U+9FFF).
pub fn is_han(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}')
}

/// True for characters in the Cantonese marker set.
pub fn is_cantonese_marker(c: char) -> bool {
    CANTONESE_MARKERS.contains(&c)
}

/// True for ASCII letters a-z / A-Z.
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Ordered detection table. Kana outrank everything because their presence
/// rules out pure Chinese; Cantonese markers outrank the generic Han check
/// because Cantonese text is full of ordinary Han characters too; Latin is
/// the fallback before giving up.
const DETECTORS: &[(fn(char) -> bool, Lang)] = &[
    (is_kana, Lang::Japanese),
    (is_cantonese_marker, Lang::Cantonese),
    (is_han, Lang::Chinese),
    (is_latin_letter, Lang::Latin),
];

/// Detect the language of a text span.
///
/// Total over all inputs: the empty string and spans without any recognized
/// script character classify as [`Lang::Neutral`].
pub fn classify(text: &str) -> Lang {
    for &(detector, lang) in DETECTORS {
        if text.chars().any(detector) {
            return lang;
        }
    }
    Lang::Neutral
}
