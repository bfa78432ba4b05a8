const TRUNCATED_MARKER: &str = "\n[truncated]";
pub const MAX_PREVIEW_CONTENT: usize = 4_096;

/// Cuts `markdown` to at most `max_bytes` on a char boundary and marks the cut.
pub fn prepare_preview(markdown: &str, max_bytes: usize) -> String {
    if markdown.len() <= max_bytes {
        return markdown.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !markdown.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATED_MARKER}", &markdown[..end])
}
