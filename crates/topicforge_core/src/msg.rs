use std::path::PathBuf;

use crate::{ContentBlock, GenerationMode, GenerationStep, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic field.
    TopicChanged(String),
    /// User edited the API key field.
    CredentialChanged(String),
    /// User picked a model id.
    ModelSelected(String),
    /// User picked a generation mode.
    ModeSelected(GenerationMode),
    /// User toggled the dark theme.
    ThemeToggled,
    /// User asked for a new generation run.
    GenerateClicked,
    /// Engine reached a pipeline step.
    GenerationProgress { run_id: RunId, step: GenerationStep },
    /// Engine finished a run with all blocks in outline order.
    GenerationSucceeded {
        run_id: RunId,
        blocks: Vec<ContentBlock>,
    },
    /// Engine gave up on a run. Details are logged by the effect runner.
    GenerationFailed { run_id: RunId },
    /// User cleared the generated content.
    ResetClicked,
    /// User asked to copy the content as markdown.
    CopyClicked,
    /// Clipboard write finished.
    CopyFinished { ok: bool },
    /// User asked for the paginated document.
    ExportClicked,
    /// Document export finished.
    ExportFinished { result: Result<PathBuf, String> },
    /// User navigated back to the input form.
    BackToInput,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
