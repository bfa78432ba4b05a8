use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::stream::{FuturesUnordered, StreamExt};
use topicforge_core::{
    block_title, expansion_prompt, outline_prompt, parse_outline, ContentBlock, GenerationRequest,
    GenerationStep, MAX_OUTLINE_ITEMS,
};

use crate::{
    CompletionClient, CompletionError, CompletionRequest, EngineEvent, PipelineError,
    PipelineEvent,
};

/// How expansion requests are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// One request at a time, in outline order.
    #[default]
    Sequential,
    /// All requests in flight together; results are re-sorted by outline index.
    Concurrent,
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub dispatch: Dispatch,
    pub outline_max_tokens: u32,
    pub expansion_max_tokens: u32,
    pub temperature: f32,
    pub max_outline_items: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            dispatch: Dispatch::Sequential,
            outline_max_tokens: 500,
            expansion_max_tokens: 2500,
            temperature: 0.7,
            max_outline_items: MAX_OUTLINE_ITEMS,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Forwards pipeline steps to the engine event channel, tagged with the run id.
pub struct ChannelProgressSink {
    run_id: topicforge_core::RunId,
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(run_id: topicforge_core::RunId, tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { run_id, tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: PipelineEvent) {
        let PipelineEvent::Step(step) = event;
        let _ = self.tx.send(EngineEvent::Progress {
            run_id: self.run_id,
            step,
        });
    }
}

/// Outline-then-expand generation against one completion client.
#[derive(Clone)]
pub struct GenerationPipeline {
    client: Arc<dyn CompletionClient>,
    settings: PipelineSettings,
}

impl GenerationPipeline {
    pub fn new(client: Arc<dyn CompletionClient>, settings: PipelineSettings) -> Self {
        Self { client, settings }
    }

    /// Runs one generation. Either every block is returned in outline order
    /// or a single error; partial results are dropped.
    pub async fn run(
        &self,
        request: &GenerationRequest,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ContentBlock>, PipelineError> {
        request.validate()?;
        engine_info!(
            "Generation started topic={:?} model={} mode={} credential={}",
            request.topic,
            request.model_id,
            request.mode,
            engine_logging::redact(&request.credential)
        );

        sink.emit(PipelineEvent::Step(GenerationStep::Outline));
        let outline = self
            .outline(request)
            .await
            .map_err(|source| upstream(GenerationStep::Outline, source))?;
        engine_info!("Outline has {} entries", outline.len());

        sink.emit(PipelineEvent::Step(GenerationStep::Bodies));
        let blocks = match self.settings.dispatch {
            Dispatch::Sequential => self.expand_sequential(request, &outline).await,
            Dispatch::Concurrent => self.expand_concurrent(request, &outline).await,
        }
        .map_err(|source| upstream(GenerationStep::Bodies, source))?;

        sink.emit(PipelineEvent::Step(GenerationStep::Done));
        engine_info!(
            "Generation finished blocks={} words={}",
            blocks.len(),
            blocks.iter().map(ContentBlock::word_count).sum::<usize>()
        );
        Ok(blocks)
    }

    async fn outline(&self, request: &GenerationRequest) -> Result<Vec<String>, CompletionError> {
        let call = CompletionRequest {
            model: request.model_id.clone(),
            prompt: outline_prompt(&request.topic),
            max_tokens: self.settings.outline_max_tokens,
            temperature: self.settings.temperature,
        };
        let raw = self.client.complete(&request.credential, &call).await?;
        let mut outline = parse_outline(&raw);
        outline.truncate(self.settings.max_outline_items);
        Ok(outline)
    }

    async fn expand_one(
        &self,
        request: &GenerationRequest,
        index: usize,
        entry: &str,
    ) -> Result<ContentBlock, CompletionError> {
        let call = CompletionRequest {
            model: request.model_id.clone(),
            prompt: expansion_prompt(request.mode, &request.topic, index, entry),
            max_tokens: self.settings.expansion_max_tokens,
            temperature: self.settings.temperature,
        };
        let content = self.client.complete(&request.credential, &call).await?;
        let block = ContentBlock::new(block_title(request.mode, index, entry), content);
        engine_debug!(
            "Block {} ready title={:?} words={}",
            index,
            block.title(),
            block.word_count()
        );
        Ok(block)
    }

    async fn expand_sequential(
        &self,
        request: &GenerationRequest,
        outline: &[String],
    ) -> Result<Vec<ContentBlock>, CompletionError> {
        let mut blocks = Vec::with_capacity(outline.len());
        for (index, entry) in outline.iter().enumerate() {
            blocks.push(self.expand_one(request, index, entry).await?);
        }
        Ok(blocks)
    }

    async fn expand_concurrent(
        &self,
        request: &GenerationRequest,
        outline: &[String],
    ) -> Result<Vec<ContentBlock>, CompletionError> {
        let mut pending: FuturesUnordered<_> = outline
            .iter()
            .enumerate()
            .map(|(index, entry)| async move { (index, self.expand_one(request, index, entry).await) })
            .collect();

        // Completion order is arbitrary; each result keeps its outline index.
        let mut tagged = Vec::with_capacity(outline.len());
        while let Some((index, result)) = pending.next().await {
            tagged.push((index, result?));
        }
        tagged.sort_by_key(|(index, _)| *index);
        Ok(tagged.into_iter().map(|(_, block)| block).collect())
    }
}

fn upstream(step: GenerationStep, source: CompletionError) -> PipelineError {
    engine_warn!("{:?} request failed: {}", step, source);
    PipelineError::Upstream { step, source }
}
