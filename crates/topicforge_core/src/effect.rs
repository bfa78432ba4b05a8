use crate::{ContentBlock, GenerationMode, GenerationRequest, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartGeneration {
        run_id: RunId,
        request: GenerationRequest,
    },
    CopyToClipboard {
        text: String,
    },
    ExportDocument {
        blocks: Vec<ContentBlock>,
        topic: String,
        mode: GenerationMode,
    },
}
