//! Topicforge core: domain types and the pure generation state machine.
mod block;
mod effect;
mod models;
mod msg;
mod outline;
mod progress;
mod request;
mod state;
mod update;
mod view_model;

pub use block::{render_markdown, ContentBlock, GenerationMode};
pub use effect::Effect;
pub use models::{find_model, ModelDescriptor, DEFAULT_MODEL_ID, MODEL_CATALOG};
pub use msg::Msg;
pub use outline::{
    block_title, expansion_prompt, outline_prompt, parse_outline, MAX_OUTLINE_ITEMS,
    MIN_SECTION_WORDS,
};
pub use progress::{GenerationStep, Progress, PIPELINE_STEPS};
pub use request::{GenerationRequest, InputError};
pub use state::{AppState, RunId, Screen};
pub use update::{update, COPY_FAILED_NOTICE, GENERATION_FAILED_NOTICE, INPUT_REQUIRED_NOTICE};
pub use view_model::{AppViewModel, BlockRowView, Notice, NoticeSeverity};
