use crate::GenerationMode;

/// Upper bound on outline entries kept from the model's answer.
pub const MAX_OUTLINE_ITEMS: usize = 10;

/// Length target requested for every expanded block.
pub const MIN_SECTION_WORDS: usize = 1500;

/// Prompt asking the model to split `topic` into outline entries.
pub fn outline_prompt(topic: &str) -> String {
    format!(
        "Break the topic \"{topic}\" down into exactly {MAX_OUTLINE_ITEMS} subtopics that together \
         cover it completely. Return only the subtopics, one per line, optionally numbered, \
         with no introduction or closing remarks."
    )
}

/// Prompt for expanding the outline entry at `index` (zero-based).
pub fn expansion_prompt(mode: GenerationMode, topic: &str, index: usize, entry: &str) -> String {
    match mode {
        GenerationMode::FullDocument => format!(
            "Write chapter {number} of a book about \"{topic}\". The chapter is titled \
             \"{entry}\". Write at least {MIN_SECTION_WORDS} words. Format the chapter in \
             markdown with section headings, paragraphs and lists where they help the reader.",
            number = index + 1,
        ),
        GenerationMode::SectionExpansion => format!(
            "Write a detailed standalone explanation of \"{entry}\" in the context of \
             \"{topic}\". Write at least {MIN_SECTION_WORDS} words. Format the text in markdown \
             with headings, paragraphs and lists where they help the reader. Do not refer to \
             chapters, books or other sections.",
        ),
    }
}

/// Title of the block generated for the outline entry at `index` (zero-based).
pub fn block_title(mode: GenerationMode, index: usize, entry: &str) -> String {
    match mode {
        GenerationMode::FullDocument => format!("Chapter {}: {}", index + 1, entry),
        GenerationMode::SectionExpansion => entry.to_string(),
    }
}

/// Parses the model's outline answer: one entry per non-blank line, leading
/// numbering removed, at most [`MAX_OUTLINE_ITEMS`] entries.
pub fn parse_outline(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_numbering(line).trim().to_string())
        .take(MAX_OUTLINE_ITEMS)
        .collect()
}

/// Removes a leading `<digits><optional '.'><whitespace>` marker.
fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }
    if let Some(after_dot) = rest.strip_prefix('.') {
        return after_dot.trim_start();
    }
    if rest.starts_with(char::is_whitespace) {
        return rest.trim_start();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::strip_numbering;

    #[test]
    fn numbering_variants_are_stripped() {
        assert_eq!(strip_numbering("1. History"), "History");
        assert_eq!(strip_numbering("10.Rules"), "Rules");
        assert_eq!(strip_numbering("3 Footwork"), "Footwork");
    }

    #[test]
    fn digits_that_belong_to_the_entry_are_kept() {
        assert_eq!(strip_numbering("3D printing"), "3D printing");
        assert_eq!(strip_numbering("1990s fashion"), "1990s fashion");
        assert_eq!(strip_numbering("Rules"), "Rules");
    }
}
