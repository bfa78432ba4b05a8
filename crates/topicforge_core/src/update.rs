use crate::view_model::Notice;
use crate::{render_markdown, AppState, Effect, Msg, Screen};

pub const INPUT_REQUIRED_NOTICE: &str = "Please enter a topic and an API key.";
pub const GENERATION_FAILED_NOTICE: &str =
    "Generation failed. Check your API key and model, then try again.";
pub const COPY_FAILED_NOTICE: &str = "Could not copy to the clipboard.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicChanged(topic) => {
            state.set_topic(topic);
            Vec::new()
        }
        Msg::CredentialChanged(credential) => {
            state.set_credential(credential);
            Vec::new()
        }
        Msg::ModelSelected(model_id) => {
            state.set_model(model_id);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::ThemeToggled => {
            state.toggle_theme();
            Vec::new()
        }
        Msg::GenerateClicked => {
            // One run at a time: the trigger is inert while loading.
            if state.is_loading() {
                return (state, Vec::new());
            }
            let request = state.request();
            if request.validate().is_err() {
                state.set_notice(Notice::error(INPUT_REQUIRED_NOTICE));
                return (state, Vec::new());
            }
            state.clear_notice();
            let run_id = state.begin_run();
            vec![Effect::StartGeneration { run_id, request }]
        }
        Msg::GenerationProgress { run_id, step } => {
            if state.is_active_run(run_id) {
                state.apply_progress(step);
            }
            Vec::new()
        }
        Msg::GenerationSucceeded { run_id, blocks } => {
            if state.is_active_run(run_id) {
                state.publish(blocks);
                state.show(Screen::Preview);
            }
            Vec::new()
        }
        Msg::GenerationFailed { run_id } => {
            if state.is_active_run(run_id) {
                state.finish_run();
                state.set_notice(Notice::error(GENERATION_FAILED_NOTICE));
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset_generation();
            state.clear_notice();
            state.show(Screen::Input);
            Vec::new()
        }
        Msg::CopyClicked => {
            if state.blocks().is_empty() {
                Vec::new()
            } else {
                vec![Effect::CopyToClipboard {
                    text: render_markdown(state.blocks()),
                }]
            }
        }
        Msg::CopyFinished { ok } => {
            if ok {
                state.set_notice(Notice::info("Copied to clipboard."));
            } else {
                state.set_notice(Notice::error(COPY_FAILED_NOTICE));
            }
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.blocks().is_empty() {
                Vec::new()
            } else {
                vec![Effect::ExportDocument {
                    blocks: state.blocks().to_vec(),
                    topic: state.blocks_topic().to_string(),
                    mode: state.blocks_mode(),
                }]
            }
        }
        Msg::ExportFinished { result } => {
            match result {
                Ok(path) => state.set_notice(Notice::info(format!("Saved {}", path.display()))),
                Err(message) => state.set_notice(Notice::error(format!("Export failed: {message}"))),
            }
            Vec::new()
        }
        Msg::BackToInput => {
            state.show(Screen::Input);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
