use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;
use topicforge_core::{GenerationMode, DEFAULT_MODEL_ID};
use topicforge_engine::{ClientSettings, Dispatch, EngineConfig, PipelineSettings, DEFAULT_ENDPOINT};

use crate::app::RunInput;
use crate::clipboard::DEFAULT_HANDOFF_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Numbered chapters behind a cover page
    FullDocument,
    /// Standalone sections, one per outline entry
    SectionExpansion,
}

impl From<ModeArg> for GenerationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FullDocument => GenerationMode::FullDocument,
            ModeArg::SectionExpansion => GenerationMode::SectionExpansion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DispatchArg {
    /// One expansion request at a time
    Sequential,
    /// All expansion requests at once
    Concurrent,
}

impl From<DispatchArg> for Dispatch {
    fn from(dispatch: DispatchArg) -> Self {
        match dispatch {
            DispatchArg::Sequential => Dispatch::Sequential,
            DispatchArg::Concurrent => Dispatch::Concurrent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Terminal,
    File,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(log: LogArg) -> Self {
        match log {
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "topicforge")]
#[command(version, about = "Generate a structured long-form document on any topic", long_about = None)]
pub struct Cli {
    /// Topic to write about
    #[arg(short, long, required_unless_present = "list_models")]
    pub topic: Option<String>,

    /// API key for the completion endpoint
    #[arg(long, env = "TOPICFORGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model id; see --list-models
    #[arg(short, long, default_value = DEFAULT_MODEL_ID)]
    pub model: String,

    #[arg(long, value_enum, default_value_t = ModeArg::FullDocument)]
    pub mode: ModeArg,

    #[arg(long, value_enum, default_value_t = DispatchArg::Sequential)]
    pub dispatch: DispatchArg,

    /// Chat completion endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 180)]
    pub timeout_secs: u64,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Copy the markdown to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Seconds to keep serving a --copy until another program takes it
    #[arg(long, default_value_t = DEFAULT_HANDOFF_WINDOW.as_secs())]
    pub clipboard_wait_secs: u64,

    /// Skip the PDF export
    #[arg(long)]
    pub no_pdf: bool,

    #[arg(long, value_enum, default_value_t = LogArg::Terminal)]
    pub log: LogArg,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the known models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Dark preview banner
    #[arg(long)]
    pub dark: bool,
}

impl Cli {
    pub fn run_input(&self) -> RunInput {
        RunInput {
            topic: self.topic.clone().unwrap_or_default(),
            credential: self.api_key.clone().unwrap_or_default(),
            model_id: self.model.clone(),
            mode: self.mode.into(),
            dark_theme: self.dark,
            copy: self.copy,
            export_pdf: !self.no_pdf,
        }
    }

    pub fn clipboard_handoff(&self) -> Duration {
        Duration::from_secs(self.clipboard_wait_secs)
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            client: ClientSettings {
                endpoint: self.endpoint.clone(),
                request_timeout: Duration::from_secs(self.timeout_secs),
                ..ClientSettings::default()
            },
            pipeline: PipelineSettings {
                dispatch: self.dispatch.into(),
                ..PipelineSettings::default()
            },
        }
    }
}
