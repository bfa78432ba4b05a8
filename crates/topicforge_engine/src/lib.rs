//! Topicforge engine: model client, generation pipeline and document export.
mod client;
mod engine;
mod export;
mod filename;
mod layout;
mod metrics;
mod pdf;
mod persist;
mod pipeline;
mod preview;
mod sanitize;
mod types;

pub use client::{
    ClientSettings, CompletionClient, CompletionRequest, ReqwestCompletionClient, DEFAULT_ENDPOINT,
};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{export_document, save_document, ExportError, ExportOptions, ExportedDocument};
pub use filename::export_filename;
pub use layout::{
    is_heading, lay_out_document, wrap_text, DocumentLayout, Page, PageGeometry, PlacedLine,
    TextStyle,
};
pub use metrics::{FontFace, StandardFontMetrics, TextMeasure};
pub use pdf::render_pdf;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    ChannelProgressSink, Dispatch, GenerationPipeline, PipelineSettings, ProgressSink,
};
pub use preview::{prepare_preview, MAX_PREVIEW_CONTENT};
pub use sanitize::{sanitize_body, sanitize_title};
pub use types::{CompletionError, EngineEvent, FailureKind, PipelineError, PipelineEvent};
