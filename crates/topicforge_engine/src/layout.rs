//! Page layout for exported documents.
//!
//! Layout is a single pass with a running vertical cursor measured from the
//! top edge of the page. Every placed line records its baseline position, so
//! the result can be checked without decoding the PDF.

use topicforge_core::{ContentBlock, GenerationMode};

use crate::sanitize::{sanitize_body, sanitize_title};
use crate::{ExportOptions, FontFace, TextMeasure};

const MM: f32 = 72.0 / 25.4;

pub const COVER_SUBTITLE: &str = "A Comprehensive Guide";

/// Longest line (in characters) still considered a heading.
const HEADING_MAX_CHARS: usize = 80;

/// Page size and margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageGeometry {
    /// A4 portrait with 20 mm margins.
    fn default() -> Self {
        Self {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin_top: 20.0 * MM,
            margin_bottom: 20.0 * MM,
            margin_left: 20.0 * MM,
            margin_right: 20.0 * MM,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest baseline a line may be drawn at.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    /// Distance from this baseline to the next one.
    pub leading: f32,
}

impl TextStyle {
    pub const COVER_TITLE: Self = Self::new(FontFace::Bold, 28.0, 36.0);
    pub const COVER_SUBTITLE: Self = Self::new(FontFace::Regular, 16.0, 22.0);
    pub const COVER_DATE: Self = Self::new(FontFace::Regular, 12.0, 16.0);
    pub const BLOCK_TITLE: Self = Self::new(FontFace::Bold, 20.0, 28.0);
    pub const HEADING: Self = Self::new(FontFace::Bold, 14.0, 20.0);
    pub const BODY: Self = Self::new(FontFace::Regular, 11.0, 16.0);

    const fn new(face: FontFace, size: f32, leading: f32) -> Self {
        Self {
            face,
            size,
            leading,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    /// Baseline, measured down from the top edge.
    pub y: f32,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Best-effort heading detection on one sanitized line: short, starts with an
/// upper-case letter, no period. Misfires on arbitrary prose are expected.
pub fn is_heading(line: &str) -> bool {
    let line = line.trim();
    line.chars().count() < HEADING_MAX_CHARS
        && line.starts_with(|c: char| c.is_ascii_uppercase())
        && !line.contains('.')
}

/// Greedy word wrap to `max_width`. Words wider than a whole line are split
/// between characters.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    measure: &dyn TextMeasure,
    face: FontFace,
    size: f32,
) -> Vec<String> {
    let fits = |candidate: &str| measure.width(candidate, face, size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            if fits(word) {
                current.push_str(word);
                continue;
            }
        } else {
            let candidate = format!("{current} {word}");
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            if fits(word) {
                current.push_str(word);
                continue;
            }
        }

        for c in word.chars() {
            current.push(c);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lays out the cover page (full-document mode) and every block. Each block
/// after the cover, or after the first block in section mode, starts a page.
pub fn lay_out_document(
    blocks: &[ContentBlock],
    options: &ExportOptions,
    geometry: PageGeometry,
    measure: &dyn TextMeasure,
) -> DocumentLayout {
    let mut writer = PageWriter::new(geometry, measure);

    if options.mode == GenerationMode::FullDocument {
        writer.cover(&options.topic, &options.generated_on);
    }

    for (index, block) in blocks.iter().enumerate() {
        let break_before = match options.mode {
            GenerationMode::FullDocument => true,
            GenerationMode::SectionExpansion => index > 0,
        };
        if break_before {
            writer.page_break();
        }
        writer.block(block);
    }

    writer.finish()
}

struct PageWriter<'a> {
    geometry: PageGeometry,
    measure: &'a dyn TextMeasure,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(geometry: PageGeometry, measure: &'a dyn TextMeasure) -> Self {
        Self {
            geometry,
            measure,
            pages: vec![Page::default()],
            y: geometry.margin_top,
        }
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            geometry: self.geometry,
            pages: self.pages,
        }
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn start_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.margin_top;
    }

    /// Forced break. An empty page is reused instead of leaving it blank.
    fn page_break(&mut self) {
        if self.current_page().lines.is_empty() {
            self.y = self.geometry.margin_top;
        } else {
            self.start_page();
        }
    }

    fn skip(&mut self, amount: f32) {
        self.y += amount;
    }

    fn draw_line(&mut self, text: String, x: f32, style: TextStyle) {
        if self.y > self.geometry.bottom_limit() {
            self.start_page();
        }
        let y = self.y;
        self.current_page().lines.push(PlacedLine { text, x, y, style });
        self.y += style.leading;
    }

    fn draw_wrapped(&mut self, text: &str, style: TextStyle) {
        let max_width = self.geometry.content_width();
        for line in wrap_text(text, max_width, self.measure, style.face, style.size) {
            self.draw_line(line, self.geometry.margin_left, style);
        }
    }

    fn draw_centered(&mut self, text: &str, style: TextStyle) {
        let max_width = self.geometry.content_width();
        for line in wrap_text(text, max_width, self.measure, style.face, style.size) {
            let width = self.measure.width(&line, style.face, style.size);
            let x = ((self.geometry.width - width) / 2.0).max(self.geometry.margin_left);
            self.draw_line(line, x, style);
        }
    }

    fn cover(&mut self, topic: &str, generated_on: &str) {
        self.y = self.geometry.height / 3.0;
        let title = sanitize_title(topic).trim().to_uppercase();
        self.draw_centered(&title, TextStyle::COVER_TITLE);
        self.skip(TextStyle::COVER_TITLE.leading * 0.5);
        self.draw_centered(COVER_SUBTITLE, TextStyle::COVER_SUBTITLE);
        self.skip(TextStyle::COVER_SUBTITLE.leading * 2.0);
        let date = sanitize_body(generated_on);
        self.draw_centered(
            &format!("Generated on {}", date.trim()),
            TextStyle::COVER_DATE,
        );
    }

    fn block(&mut self, block: &ContentBlock) {
        let title = sanitize_title(block.title());
        self.draw_wrapped(title.trim(), TextStyle::BLOCK_TITLE);
        self.skip(TextStyle::BLOCK_TITLE.leading * 0.5);

        let body = sanitize_body(block.content());
        for raw in body.lines() {
            let line = raw.trim();
            if line.is_empty() {
                self.skip(TextStyle::BODY.leading * 0.5);
            } else if is_heading(line) {
                self.skip(TextStyle::HEADING.leading * 0.5);
                self.draw_wrapped(line, TextStyle::HEADING);
            } else {
                self.draw_wrapped(line, TextStyle::BODY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StandardFontMetrics;

    /// Every character is `size` points wide.
    struct Monospace;

    impl TextMeasure for Monospace {
        fn width(&self, text: &str, _face: FontFace, size: f32) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    #[test]
    fn wrap_breaks_between_words() {
        let lines = wrap_text("aaa bbb ccc", 7.0, &Monospace, FontFace::Regular, 1.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_text("ab abcdefgh c", 3.0, &Monospace, FontFace::Regular, 1.0);
        assert_eq!(lines, vec!["ab", "abc", "def", "gh", "c"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_text("   ", 100.0, &Monospace, FontFace::Regular, 1.0).is_empty());
    }

    #[test]
    fn wrapped_lines_fit_the_content_width() {
        let geometry = PageGeometry::default();
        let text = "Footwork is the foundation of every punch. ".repeat(40);
        let lines = wrap_text(
            &text,
            geometry.content_width(),
            &StandardFontMetrics,
            FontFace::Regular,
            11.0,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(StandardFontMetrics.width(line, FontFace::Regular, 11.0) <= geometry.content_width());
        }
    }

    #[test]
    fn heading_rule() {
        assert!(is_heading("Training Basics"));
        assert!(is_heading("  The Jab: Why It Matters  "));
        assert!(!is_heading("Training basics are covered below."));
        assert!(!is_heading("lowercase start"));
        assert!(!is_heading("- List item"));
        assert!(!is_heading(""));
        assert!(!is_heading(&format!("A{}", "b".repeat(HEADING_MAX_CHARS))));
    }

    #[test]
    fn a4_geometry() {
        let geometry = PageGeometry::default();
        assert!((geometry.width - 595.28).abs() < 0.01);
        assert!((geometry.height - 841.89).abs() < 0.01);
        assert!((geometry.content_width() - 481.89).abs() < 0.01);
    }
}
