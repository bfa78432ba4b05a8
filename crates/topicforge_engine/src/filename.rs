use topicforge_core::GenerationMode;

/// Download name for an export: `{topic}_{suffix}.pdf`, whitespace runs
/// replaced by `_`, safe on Windows.
pub fn export_filename(topic: &str, mode: GenerationMode) -> String {
    let stem = sanitize_stem(topic);
    format!("{stem}_{}.pdf", mode.file_suffix())
}

const MAX_STEM_CHARS: usize = 80;

fn sanitize_stem(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.trim().chars() {
        let c = if c.is_whitespace() || is_forbidden(c) {
            '_'
        } else {
            c
        };
        // Collapse runs so "a   b" and "a / b" both become "a_b".
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }

    // Cap before trimming so a cut on a separator cannot leave a trailing '_'.
    let capped: String = cleaned
        .trim_start_matches(&['_', '.'][..])
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    let mut stem = capped.trim_end_matches(&['_', '.'][..]).to_string();
    if stem.is_empty() {
        stem = "untitled".to_string();
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
