//! topicforge: generate a structured long-form document on a topic.

mod app;
mod cli;
mod clipboard;
mod effects;
mod render;

use std::io;
use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::{engine_error, engine_info, engine_warn};
use topicforge_core::{find_model, MODEL_CATALOG};
use topicforge_engine::EngineHandle;

use crate::app::App;
use crate::cli::Cli;
use crate::clipboard::SystemClipboard;
use crate::effects::EffectRunner;
use crate::render::Renderer;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            engine_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_models {
        for model in MODEL_CATALOG {
            println!("{:<14} {:<14} {}", model.id, model.display_name, model.description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    engine_logging::initialize(cli.log.into(), cli.log_level());
    engine_info!(
        "topicforge {} starting model={} mode={:?} output_dir={:?}",
        env!("CARGO_PKG_VERSION"),
        cli.model,
        cli.mode,
        cli.output_dir
    );
    if find_model(&cli.model).is_none() {
        engine_warn!("Model {:?} is not in the catalog; sending it as given", cli.model);
    }

    let engine =
        EngineHandle::new(cli.engine_config()).context("failed to start the generation engine")?;
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(
        engine,
        Box::new(SystemClipboard::new(cli.clipboard_handoff())),
        cli.output_dir.clone(),
        msg_tx,
    );
    let mut app = App::new(runner, msg_rx, Renderer::new(io::stdout()));
    let outcome = app.run(cli.run_input())?;
    engine_info!("Finished with {:?}", outcome);
    Ok(outcome.exit_code())
}
