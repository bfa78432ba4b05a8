//! Character filtering for the standard PDF fonts.
//!
//! The export uses the built-in Helvetica faces, which only cover a Latin
//! code page. Model output routinely carries emoji, smart quotes and markdown
//! markers, so text is reduced to plain ASCII before layout.

const MARKDOWN_MARKERS: [char; 4] = ['#', '*', '_', '`'];
const BODY_PUNCTUATION: [char; 9] = ['.', ',', '!', '?', ':', ';', '(', ')', '-'];
const TITLE_PUNCTUATION: [char; 4] = [':', '-', '(', ')'];

/// Strips markdown markers, then anything outside word characters,
/// whitespace and `. , ! ? : ; ( ) -`.
pub fn sanitize_body(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .filter(|&c| is_word_char(c) || c.is_ascii_whitespace() || BODY_PUNCTUATION.contains(&c))
        .collect()
}

/// Like [`sanitize_body`] with a narrower punctuation set: `: - ( )`.
pub fn sanitize_title(text: &str) -> String {
    text.chars()
        .filter(|c| !MARKDOWN_MARKERS.contains(c))
        .filter(|&c| is_word_char(c) || c.is_ascii_whitespace() || TITLE_PUNCTUATION.contains(&c))
        .collect()
}

// ASCII only: the standard fonts cannot draw anything else reliably.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
