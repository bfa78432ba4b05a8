use pretty_assertions::assert_eq;
use topicforge_core::{
    block_title, expansion_prompt, outline_prompt, parse_outline, GenerationMode,
    MAX_OUTLINE_ITEMS,
};

#[test]
fn blank_lines_are_dropped_and_numbering_stripped() {
    let raw = "1. History\n\n  2.  Rules  \n3 Equipment\r\n   \nFootwork\n";

    let outline = parse_outline(raw);

    assert_eq!(outline, vec!["History", "Rules", "Equipment", "Footwork"]);
}

#[test]
fn short_answers_keep_every_line() {
    let raw = (1..=4)
        .map(|i| format!("{i}. Item {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    let outline = parse_outline(&raw);

    assert_eq!(outline.len(), 4);
    assert_eq!(outline[3], "Item 4");
}

#[test]
fn long_answers_keep_the_first_ten_in_order() {
    let raw = (1..=14)
        .map(|i| format!("{i}. Item {i}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    let outline = parse_outline(&raw);

    assert_eq!(outline.len(), MAX_OUTLINE_ITEMS);
    assert_eq!(outline.first().map(String::as_str), Some("Item 1"));
    assert_eq!(outline.last().map(String::as_str), Some("Item 10"));
}

#[test]
fn empty_answer_gives_empty_outline() {
    assert!(parse_outline("\n  \n").is_empty());
}

#[test]
fn titles_follow_the_mode() {
    let outline = ["History", "Rules", "Footwork"];
    for (index, entry) in outline.iter().enumerate() {
        assert_eq!(
            block_title(GenerationMode::FullDocument, index, entry),
            format!("Chapter {}: {}", index + 1, entry)
        );
        assert_eq!(
            block_title(GenerationMode::SectionExpansion, index, entry),
            *entry
        );
    }
}

#[test]
fn prompts_carry_topic_entry_and_numbering() {
    let outline = outline_prompt("Boxing");
    assert!(outline.contains("Boxing"));
    assert!(outline.contains("one per line"));

    let chapter = expansion_prompt(GenerationMode::FullDocument, "Boxing", 1, "Rules");
    assert!(chapter.contains("chapter 2 of a book"));
    assert!(chapter.contains("Rules"));
    assert!(chapter.contains("1500 words"));

    let section = expansion_prompt(GenerationMode::SectionExpansion, "Boxing", 1, "Footwork");
    assert!(section.contains("Footwork"));
    assert!(!section.to_lowercase().contains("chapter 2"));
}
