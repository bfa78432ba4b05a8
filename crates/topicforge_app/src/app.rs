use std::io::Write;
use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::{Context, Result};
use topicforge_core::{render_markdown, update, AppState, GenerationMode, Msg, Screen};
use topicforge_engine::{prepare_preview, MAX_PREVIEW_CONTENT};

use crate::effects::EffectRunner;
use crate::render::Renderer;

/// Form values and output switches for one invocation.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub topic: String,
    pub credential: String,
    pub model_id: String,
    pub mode: GenerationMode,
    pub dark_theme: bool,
    pub copy: bool,
    pub export_pdf: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    InputRejected,
    GenerationFailed,
    OutputFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::InputRejected => ExitCode::from(2),
            Outcome::GenerationFailed | Outcome::OutputFailed => ExitCode::FAILURE,
        }
    }
}

/// Drives the core state machine from the terminal.
pub struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    renderer: Renderer<W>,
}

impl<W: Write> App<W> {
    pub fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>, renderer: Renderer<W>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            msg_rx,
            renderer,
        }
    }

    pub fn run(&mut self, input: RunInput) -> Result<Outcome> {
        self.dispatch(Msg::TopicChanged(input.topic))?;
        self.dispatch(Msg::CredentialChanged(input.credential))?;
        self.dispatch(Msg::ModelSelected(input.model_id))?;
        self.dispatch(Msg::ModeSelected(input.mode))?;
        if input.dark_theme {
            self.dispatch(Msg::ThemeToggled)?;
        }

        self.dispatch(Msg::GenerateClicked)?;
        if !self.state.is_loading() {
            return Ok(Outcome::InputRejected);
        }
        while self.state.is_loading() {
            let msg = self.next_msg()?;
            self.dispatch(msg)?;
        }

        let view = self.state.view();
        if view.screen != Screen::Preview {
            return Ok(Outcome::GenerationFailed);
        }
        let markdown = render_markdown(self.state.blocks());
        self.renderer.preview(
            &view.topic,
            view.dark_theme,
            &prepare_preview(&markdown, MAX_PREVIEW_CONTENT),
        )?;

        let mut outcome = Outcome::Completed;
        if input.copy
            && !self.round_trip(Msg::CopyClicked, |msg| {
                matches!(msg, Msg::CopyFinished { ok: true })
            })?
        {
            outcome = Outcome::OutputFailed;
        }
        if input.export_pdf
            && !self.round_trip(Msg::ExportClicked, |msg| {
                matches!(msg, Msg::ExportFinished { result: Ok(_) })
            })?
        {
            outcome = Outcome::OutputFailed;
        }
        Ok(outcome)
    }

    /// Applies one message, renders if the state changed and runs the effects.
    /// Returns how many effects were started.
    fn dispatch(&mut self, msg: Msg) -> Result<usize> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            self.renderer.render(&view).context("failed to write to the terminal")?;
        }
        let started = effects.len();
        self.runner.run(effects);
        Ok(started)
    }

    /// Sends `msg` and pumps messages until its effect reports back.
    /// A message that starts no effect (nothing to copy or export) counts as done.
    fn round_trip(&mut self, msg: Msg, succeeded: impl Fn(&Msg) -> bool) -> Result<bool> {
        if self.dispatch(msg)? == 0 {
            return Ok(true);
        }
        loop {
            let msg = self.next_msg()?;
            let finished = matches!(msg, Msg::CopyFinished { .. } | Msg::ExportFinished { .. });
            let ok = succeeded(&msg);
            self.dispatch(msg)?;
            if finished {
                return Ok(ok);
            }
        }
    }

    fn next_msg(&self) -> Result<Msg> {
        self.msg_rx
            .recv()
            .context("effect runner stopped before the run finished")
    }

    #[cfg(test)]
    fn into_renderer(self) -> Renderer<W> {
        self.renderer
    }
}
