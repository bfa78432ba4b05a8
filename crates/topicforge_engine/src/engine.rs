use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::engine_info;
use topicforge_core::{GenerationRequest, RunId};

use crate::pipeline::ChannelProgressSink;
use crate::{
    ClientSettings, EngineEvent, GenerationPipeline, PipelineSettings, ReqwestCompletionClient,
};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub pipeline: PipelineSettings,
}

enum EngineCommand {
    Generate {
        run_id: RunId,
        request: GenerationRequest,
    },
}

/// Runs generation pipelines on a background tokio runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        let client = Arc::new(ReqwestCompletionClient::new(config.client));
        Self::with_pipeline(GenerationPipeline::new(client, config.pipeline))
    }

    /// Builds a handle around an already configured pipeline.
    pub fn with_pipeline(pipeline: GenerationPipeline) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let pipeline = pipeline.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&pipeline, command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn generate(&self, run_id: RunId, request: GenerationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Generate { run_id, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// engine thread is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    pipeline: &GenerationPipeline,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { run_id, request } => {
            engine_info!("Run {} dispatched", run_id);
            let sink = ChannelProgressSink::new(run_id, event_tx.clone());
            let result = pipeline.run(&request, &sink).await;
            let _ = event_tx.send(EngineEvent::GenerationCompleted { run_id, result });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_event_channel_is_reported_as_disconnected() {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let handle = EngineHandle {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        };

        assert_eq!(
            handle.recv_timeout(Duration::from_millis(10)),
            Err(RecvTimeoutError::Timeout)
        );
        drop(event_tx);
        assert_eq!(
            handle.recv_timeout(Duration::from_secs(5)),
            Err(RecvTimeoutError::Disconnected)
        );
    }
}
