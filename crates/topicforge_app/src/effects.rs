use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use chrono::Local;
use engine_logging::{engine_error, engine_info, engine_warn};
use topicforge_core::{ContentBlock, Effect, GenerationMode, Msg};
use topicforge_engine::{
    export_document, save_document, EngineEvent, EngineHandle, ExportOptions,
};

use crate::clipboard::ClipboardWriter;

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Executes effects returned by `update` and feeds their outcomes back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardWriter>,
    output_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        clipboard: Box<dyn ClipboardWriter>,
        output_dir: PathBuf,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        spawn_event_loop(engine.clone(), msg_tx.clone());
        Self {
            engine,
            clipboard,
            output_dir,
            msg_tx,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartGeneration { run_id, request } => {
                    engine_info!("StartGeneration run_id={} request={:?}", run_id, request);
                    self.engine.generate(run_id, request);
                }
                Effect::CopyToClipboard { text } => {
                    let ok = self.clipboard.write_text(&text);
                    let _ = self.msg_tx.send(Msg::CopyFinished { ok });
                }
                Effect::ExportDocument {
                    blocks,
                    topic,
                    mode,
                } => {
                    let generated_on = Local::now().format("%B %-d, %Y").to_string();
                    let result = export_to(&self.output_dir, &blocks, topic, mode, generated_on);
                    let _ = self.msg_tx.send(Msg::ExportFinished { result });
                }
            }
        }
    }
}

/// Renders and saves the PDF; the error is flattened to text for the notice.
pub(crate) fn export_to(
    output_dir: &Path,
    blocks: &[ContentBlock],
    topic: String,
    mode: GenerationMode,
    generated_on: String,
) -> Result<PathBuf, String> {
    let options = ExportOptions {
        topic,
        mode,
        generated_on,
    };
    export_document(blocks, &options)
        .and_then(|document| save_document(output_dir, &document))
        .map_err(|err| {
            engine_error!("Export to {:?} failed: {}", output_dir, err);
            err.to_string()
        })
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress { run_id, step } => Msg::GenerationProgress { run_id, step },
        EngineEvent::GenerationCompleted { run_id, result } => match result {
            Ok(blocks) => Msg::GenerationSucceeded { run_id, blocks },
            Err(err) => {
                // The state only shows a generic notice; the detail goes to the log.
                if err.is_user_error() {
                    engine_info!("Run {} rejected: {}", run_id, err);
                } else {
                    engine_warn!("Run {} failed: {}", run_id, err);
                }
                Msg::GenerationFailed { run_id }
            }
        },
    }
}

fn spawn_event_loop(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || forward_events(|timeout| engine.recv_timeout(timeout), &msg_tx));
}

/// Forwards engine events as messages, with a `Tick` per idle poll. Stops once
/// either the engine or the message receiver has gone away.
fn forward_events(
    mut recv: impl FnMut(Duration) -> Result<EngineEvent, RecvTimeoutError>,
    msg_tx: &mpsc::Sender<Msg>,
) {
    loop {
        let msg = match recv(EVENT_POLL) {
            Ok(event) => map_event(event),
            Err(RecvTimeoutError::Timeout) => Msg::Tick,
            Err(RecvTimeoutError::Disconnected) => {
                engine_warn!("Engine event channel closed; no further events");
                break;
            }
        };
        if msg_tx.send(msg).is_err() {
            break;
        }
    }
}
