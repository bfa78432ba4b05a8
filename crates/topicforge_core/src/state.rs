use crate::view_model::{AppViewModel, BlockRowView, Notice};
use crate::{ContentBlock, GenerationMode, GenerationRequest, Progress, DEFAULT_MODEL_ID};

pub type RunId = u64;

/// Which view the front end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Input,
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormState {
    topic: String,
    credential: String,
    model_id: String,
    mode: GenerationMode,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            topic: String::new(),
            credential: String::new(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            mode: GenerationMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct GenerationState {
    blocks: Vec<ContentBlock>,
    /// Mode of the current or last run.
    blocks_mode: GenerationMode,
    /// Topic of the current or last run.
    blocks_topic: String,
    progress: Progress,
    loading: bool,
    active_run: Option<RunId>,
    last_run: RunId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormState,
    generation: GenerationState,
    screen: Screen,
    dark_theme: bool,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            screen: self.screen,
            dark_theme: self.dark_theme,
            topic: self.form.topic.clone(),
            model_id: self.form.model_id.clone(),
            mode: self.form.mode,
            has_credential: !self.form.credential.trim().is_empty(),
            loading: self.generation.loading,
            progress: self.generation.progress,
            blocks: self
                .generation
                .blocks
                .iter()
                .enumerate()
                .map(|(index, block)| BlockRowView {
                    index,
                    title: block.title().to_string(),
                    word_count: block.word_count(),
                })
                .collect(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Published blocks in outline order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.generation.blocks
    }

    pub fn progress(&self) -> Progress {
        self.generation.progress
    }

    pub fn is_loading(&self) -> bool {
        self.generation.loading
    }

    pub fn active_run(&self) -> Option<RunId> {
        self.generation.active_run
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        self.form.topic = topic;
        self.mark_dirty();
    }

    pub(crate) fn set_credential(&mut self, credential: String) {
        self.form.credential = credential;
        self.mark_dirty();
    }

    pub(crate) fn set_model(&mut self, model_id: String) {
        self.form.model_id = model_id;
        self.mark_dirty();
    }

    pub(crate) fn set_mode(&mut self, mode: GenerationMode) {
        self.form.mode = mode;
        self.mark_dirty();
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.dark_theme = !self.dark_theme;
        self.mark_dirty();
    }

    pub(crate) fn show(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn request(&self) -> GenerationRequest {
        GenerationRequest::new(
            self.form.topic.trim(),
            self.form.credential.trim(),
            self.form.model_id.trim(),
            self.form.mode,
        )
    }

    /// Clears previous output and opens a new run.
    pub(crate) fn begin_run(&mut self) -> RunId {
        let run_id = self.generation.last_run + 1;
        self.generation.last_run = run_id;
        self.generation.active_run = Some(run_id);
        self.generation.blocks.clear();
        self.generation.blocks_mode = self.form.mode;
        self.generation.blocks_topic = self.form.topic.trim().to_string();
        self.generation.progress.reset();
        self.generation.loading = true;
        self.mark_dirty();
        run_id
    }

    pub(crate) fn is_active_run(&self, run_id: RunId) -> bool {
        self.generation.loading && self.generation.active_run == Some(run_id)
    }

    pub(crate) fn apply_progress(&mut self, step: crate::GenerationStep) {
        if self.generation.progress.advance(step) {
            self.mark_dirty();
        }
    }

    pub(crate) fn publish(&mut self, blocks: Vec<ContentBlock>) {
        self.generation.blocks = blocks;
        self.generation
            .progress
            .advance(crate::GenerationStep::Done);
        self.finish_run();
    }

    pub(crate) fn finish_run(&mut self) {
        self.generation.loading = false;
        self.generation.active_run = None;
        self.mark_dirty();
    }

    /// Drops blocks and progress; any in-flight run is detached.
    pub(crate) fn reset_generation(&mut self) {
        self.generation.blocks.clear();
        self.generation.blocks_topic.clear();
        self.generation.progress.reset();
        self.finish_run();
    }

    pub(crate) fn blocks_topic(&self) -> &str {
        &self.generation.blocks_topic
    }

    pub(crate) fn blocks_mode(&self) -> GenerationMode {
        self.generation.blocks_mode
    }
}
