//! Voice selection tables for the speech service.
//!
//! Maps a detected language and requested gender to a concrete neural voice
//! short-name. The table is a compile-time constant; lookups never allocate.

use crate::text::Lang;

use super::Gender;

/// Female/male voice pair for one language.
#[derive(Debug, Clone, Copy)]
pub struct VoicePair {
    pub female: &'static str,
    pub male: &'static str,
}

/// Fallback pair for Neutral or otherwise unmapped languages.
const CHINESE_VOICES: VoicePair = VoicePair { female: "zh-TW-HsiaoChenNeural", male: "zh-TW-YunJheNeural" };

/// Default voices per detected language.
const VOICES: &[(Lang, VoicePair)] = &[
    (Lang::Chinese, CHINESE_VOICES),
    (Lang::Cantonese, VoicePair { female: "zh-HK-HiuGaaiNeural", male: "zh-HK-WanLungNeural" }),
    (Lang::Japanese, VoicePair { female: "ja-JP-NanamiNeural", male: "ja-JP-KeitaNeural" }),
    (Lang::Latin, VoicePair { female: "en-US-JennyNeural", male: "en-US-GuyNeural" }),
];

/// Look up the voice for a language and gender.
///
/// Languages without an entry (notably [`Lang::Neutral`]) resolve through the
/// Chinese pair, matching the tool's Chinese-first default.
pub fn voice_for(lang: Lang, gender: Gender) -> &'static str {
    let pair = VOICES.iter().find(|(l, _)| *l == lang).map(|&(_, pair)| pair).unwrap_or(CHINESE_VOICES);

    match gender {
        Gender::Female => pair.female,
        Gender::Male => pair.male,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_pair() {
        assert_eq!(voice_for(Lang::Chinese, Gender::Female), "zh-TW-HsiaoChenNeural");
        assert_eq!(voice_for(Lang::Chinese, Gender::Male), "zh-TW-YunJheNeural");
        assert_eq!(voice_for(Lang::Cantonese, Gender::Female), "zh-HK-HiuGaaiNeural");
        assert_eq!(voice_for(Lang::Cantonese, Gender::Male), "zh-HK-WanLungNeural");
        assert_eq!(voice_for(Lang::Japanese, Gender::Female), "ja-JP-NanamiNeural");
        assert_eq!(voice_for(Lang::Japanese, Gender::Male), "ja-JP-KeitaNeural");
        assert_eq!(voice_for(Lang::Latin, Gender::Female), "en-US-JennyNeural");
        assert_eq!(voice_for(Lang::Latin, Gender::Male), "en-US-GuyNeural");
    }

    #[test]
    fn test_neutral_falls_back_to_chinese() {
        assert_eq!(voice_for(Lang::Neutral, Gender::Female), "zh-TW-HsiaoChenNeural");
        assert_eq!(voice_for(Lang::Neutral, Gender::Male), "zh-TW-YunJheNeural");
    }
}
