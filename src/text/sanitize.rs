//! Text cleanup before handing a sentence to the speech service.

/// Characters the synthesis voice would read out loud or stumble over:
/// brackets, markup leftovers, shell-ish symbols.
const STRIPPED: &[char] = &[
    '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '_', '*', '@', '#', '$', '%', '^', '&', '+', '=', '`', '~', '|', '\\', '/', '-',
];

/// True for the emoji blocks the service cannot speak (U+1F300-U+1F9FF).
fn is_emoji(c: char) -> bool {
    matches!(c, '\u{1F300}'..='\u{1F9FF}')
}

/// Replace noisy characters with spaces, keeping the overall length so the
/// synthesized pacing roughly matches the written text.
pub fn sanitize_for_speech(text: &str) -> String {
    text.chars().map(|c| if STRIPPED.contains(&c) || is_emoji(c) { ' ' } else { c }).collect()
}
