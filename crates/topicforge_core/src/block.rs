use std::fmt;

/// How generated blocks are framed: numbered chapters or standalone sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    #[default]
    FullDocument,
    SectionExpansion,
}

impl GenerationMode {
    /// Suffix used when deriving export filenames.
    pub fn file_suffix(self) -> &'static str {
        match self {
            GenerationMode::FullDocument => "book",
            GenerationMode::SectionExpansion => "sections",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::FullDocument => write!(f, "full-document"),
            GenerationMode::SectionExpansion => write!(f, "section-expansion"),
        }
    }
}

/// A titled unit of generated markdown. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    title: String,
    content: String,
}

impl ContentBlock {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Joins blocks into one markdown document, one `# title` section per block.
pub fn render_markdown(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str("# ");
        out.push_str(block.title());
        out.push_str("\n\n");
        out.push_str(block.content());
        out.push_str("\n\n---\n\n");
    }
    out
}
