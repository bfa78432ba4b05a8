use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use topicforge_core::{ContentBlock, GenerationMode};

use crate::layout::{lay_out_document, PageGeometry};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::sanitize::sanitize_title;
use crate::{export_filename, render_pdf, StandardFontMetrics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub topic: String,
    pub mode: GenerationMode,
    /// Human-readable date printed on the cover page.
    pub generated_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Lays out and encodes `blocks` as an A4 PDF. An empty block list still
/// produces a valid, near-empty document.
pub fn export_document(
    blocks: &[ContentBlock],
    options: &ExportOptions,
) -> Result<ExportedDocument, ExportError> {
    let layout = lay_out_document(
        blocks,
        options,
        PageGeometry::default(),
        &StandardFontMetrics,
    );
    let title = sanitize_title(&options.topic);
    let bytes = render_pdf(&layout, title.trim())?;
    let document = ExportedDocument {
        filename: export_filename(&options.topic, options.mode),
        page_count: layout.pages.len(),
        bytes,
    };
    engine_info!(
        "Exported {} blocks into {} pages ({} bytes) as {}",
        blocks.len(),
        document.page_count,
        document.bytes.len(),
        document.filename
    );
    Ok(document)
}

/// Writes the document into `output_dir` under its derived filename.
pub fn save_document(
    output_dir: &Path,
    document: &ExportedDocument,
) -> Result<PathBuf, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    Ok(writer.write(&document.filename, &document.bytes)?)
}
