use std::path::PathBuf;

use topicforge_core::{
    update, AppState, ContentBlock, Effect, GenerationMode, Msg, NoticeSeverity,
    COPY_FAILED_NOTICE,
};

fn generated(mode: GenerationMode, blocks: Vec<ContentBlock>) -> AppState {
    let msgs = vec![
        Msg::TopicChanged("Boxing".to_string()),
        Msg::CredentialChanged("sk-test".to_string()),
        Msg::ModeSelected(mode),
    ];
    let state = msgs
        .into_iter()
        .fold(AppState::new(), |state, msg| update(state, msg).0);
    let (state, _) = update(state, Msg::GenerateClicked);
    let run_id = state.active_run().expect("active run");
    update(state, Msg::GenerationSucceeded { run_id, blocks }).0
}

#[test]
fn copy_renders_markdown_sections() {
    let state = generated(
        GenerationMode::SectionExpansion,
        vec![
            ContentBlock::new("Footwork", "Stay light."),
            ContentBlock::new("Guard", "Hands up."),
        ],
    );

    let (_, effects) = update(state, Msg::CopyClicked);

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "# Footwork\n\nStay light.\n\n---\n\n# Guard\n\nHands up.\n\n---\n\n"
                .to_string(),
        }]
    );
}

#[test]
fn copy_and_export_need_content() {
    let (state, effects) = update(AppState::new(), Msg::CopyClicked);
    assert!(effects.is_empty());
    let (_, effects) = update(state, Msg::ExportClicked);
    assert!(effects.is_empty());
}

#[test]
fn export_uses_the_mode_and_topic_of_the_run() {
    let blocks = vec![ContentBlock::new("Chapter 1: History", "Long ago.")];
    let state = generated(GenerationMode::FullDocument, blocks.clone());
    // Editing the form after the run must not relabel the export.
    let (state, _) = update(state, Msg::TopicChanged("Chess".to_string()));
    let (state, _) = update(state, Msg::ModeSelected(GenerationMode::SectionExpansion));

    let (_, effects) = update(state, Msg::ExportClicked);

    assert_eq!(
        effects,
        vec![Effect::ExportDocument {
            blocks,
            topic: "Boxing".to_string(),
            mode: GenerationMode::FullDocument,
        }]
    );
}

#[test]
fn completion_messages_set_notices() {
    let state = generated(
        GenerationMode::FullDocument,
        vec![ContentBlock::new("Chapter 1: History", "Long ago.")],
    );

    let (state, _) = update(state, Msg::CopyFinished { ok: false });
    let notice = state.view().notice.expect("copy notice");
    assert_eq!(notice.severity, NoticeSeverity::Error);
    assert_eq!(notice.text, COPY_FAILED_NOTICE);

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            result: Ok(PathBuf::from("out/Boxing_book.pdf")),
        },
    );
    let notice = state.view().notice.expect("export notice");
    assert_eq!(notice.severity, NoticeSeverity::Info);
    assert!(notice.text.contains("Boxing_book.pdf"));
}
